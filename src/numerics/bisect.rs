//! Monotone bisection with a hard iteration cap
//!
//! Standard bisection for `f(x) = target` on a bracket `[lo, hi]`, assuming
//! `f` is non-decreasing over the bracket. Callers with a decreasing function
//! search `-f` against `-target` (the hitting-probability edge search does
//! exactly that).
//!
//! # Noisy targets
//!
//! When `f` is a Monte Carlo estimate, monotonicity only holds in
//! expectation: individual evaluations can order the wrong way near the
//! root and steer the bracket to the wrong half. The bracket still halves on
//! every iteration no matter what the evaluations return, so termination
//! within `ceil(log2((hi - lo) / tol))` iterations is structural — the
//! iteration cap exists for callers that set it *below* that bound on
//! purpose, and it fails closed: [`BisectionError::IterationLimit`] reports
//! the last bracket instead of handing back an arbitrary midpoint.

use std::fmt;

// =================================================================================================
// Settings / Result / Error
// =================================================================================================

/// Bisection tuning knobs
#[derive(Debug, Clone, Copy)]
pub struct BisectionSettings {
    /// Bracket width below which the search stops
    pub tolerance: f64,

    /// Hard iteration cap, independent of the tolerance
    pub max_iterations: usize,
}

impl Default for BisectionSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            max_iterations: 60,
        }
    }
}

impl BisectionSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(format!("Tolerance must be positive, got {}", self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err("Maximum iterations must be positive".to_string());
        }
        Ok(())
    }
}

/// Successful bisection outcome
#[derive(Debug, Clone, Copy)]
pub struct BisectionResult {
    /// Midpoint of the final bracket
    pub root: f64,

    /// Iterations actually spent
    pub iterations: usize,

    /// Final bracket `[lo, hi]`, width below the tolerance
    pub bracket: (f64, f64),
}

/// Bisection failure modes
#[derive(Debug, Clone, PartialEq)]
pub enum BisectionError {
    /// The target does not lie between `f(lo)` and `f(hi)`
    NotBracketed {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
        target: f64,
    },

    /// The iteration cap ran out before the bracket met the tolerance
    IterationLimit {
        bracket: (f64, f64),
        iterations: usize,
        tolerance: f64,
    },

    /// Degenerate input interval (`lo >= hi` or non-finite endpoints)
    InvalidBracket { lo: f64, hi: f64 },

    /// Invalid settings (non-positive tolerance or zero iteration cap)
    InvalidSettings(String),
}

impl fmt::Display for BisectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BisectionError::NotBracketed {
                lo,
                hi,
                f_lo,
                f_hi,
                target,
            } => write!(
                f,
                "target {} not bracketed on [{}, {}]: f(lo) = {}, f(hi) = {}",
                target, lo, hi, f_lo, f_hi
            ),
            BisectionError::IterationLimit {
                bracket,
                iterations,
                tolerance,
            } => write!(
                f,
                "iteration cap {} reached with bracket [{}, {}] still wider than {}",
                iterations, bracket.0, bracket.1, tolerance
            ),
            BisectionError::InvalidBracket { lo, hi } => {
                write!(f, "invalid bracket [{}, {}]", lo, hi)
            }
            BisectionError::InvalidSettings(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for BisectionError {}

// =================================================================================================
// Algorithm
// =================================================================================================

/// Find `x` in `[lo, hi]` with `f(x)` ≈ `target` for a non-decreasing `f`.
///
/// # Algorithm
///
/// 1. Evaluate both endpoints and require `f(lo) <= target <= f(hi)`.
/// 2. Evaluate the midpoint; keep the half whose endpoint values still
///    bracket the target.
/// 3. Stop when the bracket is narrower than the tolerance, or fail closed
///    when the iteration cap runs out first.
///
/// The returned root is the midpoint of the final bracket, so its distance
/// to the true crossing (of a genuinely monotone `f`) is at most half the
/// tolerance.
///
/// # Example
///
/// ```rust
/// use pesh_rs::numerics::{bisect, BisectionSettings};
///
/// let settings = BisectionSettings { tolerance: 1e-9, max_iterations: 60 };
/// let result = bisect(|x| x * x, 2.0, 0.0, 2.0, &settings).unwrap();
/// assert!((result.root - 2.0_f64.sqrt()).abs() < 1e-8);
/// ```
pub fn bisect<F>(
    mut f: F,
    target: f64,
    lo: f64,
    hi: f64,
    settings: &BisectionSettings,
) -> Result<BisectionResult, BisectionError>
where
    F: FnMut(f64) -> f64,
{
    settings
        .validate()
        .map_err(BisectionError::InvalidSettings)?;

    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Err(BisectionError::InvalidBracket { lo, hi });
    }

    let f_lo = f(lo);
    let f_hi = f(hi);
    if !(f_lo <= target && target <= f_hi) {
        return Err(BisectionError::NotBracketed {
            lo,
            hi,
            f_lo,
            f_hi,
            target,
        });
    }

    let (mut lo, mut hi) = (lo, hi);
    let mut iterations = 0;

    while hi - lo > settings.tolerance {
        if iterations >= settings.max_iterations {
            return Err(BisectionError::IterationLimit {
                bracket: (lo, hi),
                iterations,
                tolerance: settings.tolerance,
            });
        }

        let mid = 0.5 * (lo + hi);
        if f(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }

    Ok(BisectionResult {
        root: 0.5 * (lo + hi),
        iterations,
        bracket: (lo, hi),
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_root() {
        let settings = BisectionSettings {
            tolerance: 1e-10,
            max_iterations: 100,
        };
        let result = bisect(|x| 2.0 * x - 1.0, 0.0, 0.0, 1.0, &settings).unwrap();
        assert!((result.root - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_step_function_converges_within_iteration_bound() {
        // Deterministic monotone step with crossing at 0.37.
        let crossing = 0.37;
        let (lo, hi, tol) = (0.0_f64, 1.0_f64, 1e-6_f64);
        let expected_bound = ((hi - lo) / tol).log2().ceil() as usize;

        let settings = BisectionSettings {
            tolerance: tol,
            max_iterations: expected_bound,
        };
        let result = bisect(
            |x| if x < crossing { -1.0 } else { 1.0 },
            0.0,
            lo,
            hi,
            &settings,
        )
        .unwrap();

        assert!(result.iterations <= expected_bound);
        assert!((result.root - crossing).abs() <= tol);
    }

    #[test]
    fn test_iteration_cap_fails_closed_with_bracket() {
        let settings = BisectionSettings {
            tolerance: 1e-12,
            max_iterations: 3,
        };
        let error = bisect(|x| x, 0.5, 0.0, 1.0, &settings).unwrap_err();

        match error {
            BisectionError::IterationLimit {
                bracket,
                iterations,
                ..
            } => {
                assert_eq!(iterations, 3);
                // Three halvings of [0, 1].
                assert!((bracket.1 - bracket.0 - 0.125).abs() < 1e-15);
                assert!(bracket.0 <= 0.5 && 0.5 <= bracket.1);
            }
            other => panic!("expected IterationLimit, got {:?}", other),
        }
    }

    #[test]
    fn test_not_bracketed() {
        let settings = BisectionSettings::default();
        let error = bisect(|x| x, 5.0, 0.0, 1.0, &settings).unwrap_err();
        assert!(matches!(error, BisectionError::NotBracketed { .. }));
    }

    #[test]
    fn test_invalid_bracket() {
        let settings = BisectionSettings::default();
        assert!(matches!(
            bisect(|x| x, 0.0, 1.0, 0.0, &settings),
            Err(BisectionError::InvalidBracket { .. })
        ));
    }

    #[test]
    fn test_error_display_mentions_bracket() {
        let error = BisectionError::IterationLimit {
            bracket: (0.25, 0.5),
            iterations: 7,
            tolerance: 1e-6,
        };
        let text = format!("{}", error);
        assert!(text.contains("0.25"));
        assert!(text.contains("0.5"));
    }
}
