//! Statistical estimators
//!
//! This module turns raw trajectory outcomes into transport statistics:
//!
//! - [`hitting_probability`] — fraction of a single-radius ensemble absorbed
//!   by the sphere, with full outcome diagnostics ([`HittingEstimate`]);
//! - [`sherwood_from_quadrature`] — the probability-integral path: bisect
//!   the radius where the hitting probability falls to ~1%, integrate the
//!   probability-weighted flux over the release disk in two segments split
//!   there, and convert the captured area to a Sherwood number;
//! - [`sherwood_from_ensemble`] — the direct path: one release-grid
//!   ensemble, annulus-weighted hit fractions, same conversion. The two
//!   paths agree within statistical error and cross-validate each other;
//! - [`clift_sherwood`] — the Clift et al. correlation, the diffusive
//!   baseline the comparison layer adds to the advective estimates.
//!
//! Every estimator takes an explicit seed and owns its RNG for the duration
//! of the call: results are reproducible and independently seedable.

mod hitting;
mod sherwood;

pub use hitting::{hitting_probability, CaptureProblem, HittingEstimate};
pub use sherwood::{
    approx_advective_sherwood, clift_sherwood, modified_sherwood, sherwood_from_ensemble,
    sherwood_from_quadrature, DirectSherwood, SherwoodEstimate, SherwoodSettings,
};
