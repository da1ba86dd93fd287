//! Trajectory simulation
//!
//! This module advances ensembles of tracer particles through discrete time
//! steps until each particle is absorbed by the sphere, leaves the domain, or
//! exhausts the step budget.
//!
//! # Core Concepts
//!
//! The layers mirror the physics/numerics split of the crate:
//!
//! 1. **[`Domain`]** — WHERE the particles move
//!    - absorbing sphere + floor / outer-radius / ceiling exits
//!    - collision classification (sphere-hit takes priority)
//!
//! 2. **[`Ensemble`]** — WHAT is being advanced
//!    - structure-of-arrays particle state (`r`, `z` vectors)
//!    - origin-radius bookkeeping for per-radius statistics
//!    - one terminal [`Outcome`] flag per particle
//!
//! 3. **[`SimulationConfig`]** — HOW FAR and HOW FINE
//!    - step size `dt`, step budget
//!
//! 4. **[`EulerMaruyama`]** — the method
//!    - explicit Euler–Maruyama discretisation of the drift–diffusion SDE
//!    - whole-ensemble vectorised updates, frozen resolved particles
//!
//! Exhausting the step budget is **not** an error: leftover particles are
//! reported as [`Outcome::Unresolved`] in the [`SimulationReport`] and the
//! caller decides whether the bias matters. Only invalid configuration turns
//! into an `Err`.

mod config;
mod domain;
mod ensemble;
mod report;
mod stepper;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand the per-step ensemble update off to Rayon is an
// execution concern, not a physics concern, so it lives here. The threshold
// is stored in an AtomicUsize so benchmarks and tests can move it at runtime
// without a mutex on every step. Relaxed ordering is sufficient: the value is
// a performance hint, not a synchronisation point.
//
// Gaussian increments are always drawn sequentially from the seeded RNG
// before the update pass, so crossing the threshold never changes results.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default ensemble size above which the stepper switches to parallel
/// iteration when the crate is compiled with the `parallel` feature.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The stepper updates the ensemble sequentially when it holds fewer
/// particles than this value, and switches to Rayon when it holds more — but
/// only when the crate is compiled with the `parallel` feature.
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`: a zero threshold would force parallel
/// dispatch even for single-particle ensembles.
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop. Prevents one test from leaking a modified threshold into the
/// next.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use config::SimulationConfig;
pub use domain::Domain;
pub use ensemble::{Ensemble, Outcome, OutcomeCounts, ReleaseGrid};
pub use report::{SimulationReport, TrajectoryLog};
pub use stepper::EulerMaruyama;

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Validate ensemble positions for numerical issues.
///
/// Checks that no coordinate is NaN or infinite, which would indicate an
/// unstable step size or an error in the drift field.
pub(crate) fn validate_positions(ensemble: &Ensemble, step: usize) -> Result<(), String> {
    for (i, (&r, &z)) in ensemble
        .radial()
        .iter()
        .zip(ensemble.axial().iter())
        .enumerate()
    {
        if !r.is_finite() || !z.is_finite() {
            return Err(format!(
                "Non-finite position ({}, {}) for particle {} at step {}. \
                 This indicates numerical instability; try reducing dt.",
                r, z, i, step
            ));
        }
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 999);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        let before = parallel_threshold();
        {
            let _guard = ThresholdGuard::save(42);
            assert_eq!(parallel_threshold(), 42);
        }
        assert_eq!(parallel_threshold(), before);
    }
}
