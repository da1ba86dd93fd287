//! Noise-tolerant numerical building blocks
//!
//! Two classical algorithms, both hardened for integrands and targets that
//! are *Monte Carlo estimates* rather than smooth functions:
//!
//! - [`bisect`] — monotone binary search with an iteration cap that is
//!   independent of the tolerance, so a noisy target can never trap it in an
//!   endless loop. Non-convergence is a typed error carrying the last
//!   bracket, never a silently returned midpoint.
//! - [`adaptive_simpson`] — recursive Simpson quadrature with a per-interval
//!   tolerance budget, a recursion-depth cap and a minimum interval width.
//!   Hitting a cap is *not* an error: the best estimate comes back flagged
//!   `tolerance_met = false`, because sampling noise puts a floor under the
//!   achievable tolerance no matter how far the recursion descends.
//!
//! Each algorithm manages its own error type (the same policy as the export
//! layer): callers can react precisely instead of parsing strings.

mod bisect;
mod simpson;

pub use bisect::{bisect, BisectionError, BisectionResult, BisectionSettings};
pub use simpson::{adaptive_simpson, QuadratureResult, QuadratureSettings};
