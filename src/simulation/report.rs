//! Simulation results: outcome reports and trajectory logs

use crate::simulation::ensemble::OutcomeCounts;
use ndarray::Array3;
use std::collections::HashMap;

// =================================================================================================
// Simulation Report
// =================================================================================================

/// Summary of one stepper run
///
/// Carries everything a caller needs to judge the quality of the run: how
/// many steps were actually taken, how the ensemble resolved, and free-form
/// metadata for diagnostics and reproducibility (drift field name, Péclet
/// number, seed, ...).
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Steps actually executed (≤ the configured budget)
    pub steps_taken: usize,

    /// Outcome tally at the end of the run
    pub counts: OutcomeCounts,

    /// Step size the run used
    pub dt: f64,

    metadata: HashMap<String, String>,
}

impl SimulationReport {
    pub(crate) fn new(steps_taken: usize, counts: OutcomeCounts, dt: f64) -> Self {
        Self {
            steps_taken,
            counts,
            dt,
            metadata: HashMap::new(),
        }
    }

    /// Attach a diagnostic key/value pair.
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Look up a diagnostic value.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }

    /// True when every particle resolved within the step budget.
    pub fn all_resolved(&self) -> bool {
        self.counts.unresolved == 0
    }

    /// Fraction of the ensemble starved by the step budget.
    ///
    /// A systematic bias source: unresolved particles count as non-hits in
    /// downstream probabilities, so a large fraction here means the hitting
    /// probability is an underestimate and the run should be repeated with a
    /// larger budget.
    pub fn unresolved_fraction(&self) -> f64 {
        self.counts.unresolved_fraction()
    }
}

// =================================================================================================
// Trajectory Log
// =================================================================================================

/// Dense position history of a trajectory-recording run
///
/// Layout is `(step, particle, coordinate)` with coordinate 0 = `r` and
/// 1 = `z`; step 0 is the release position. Resolved particles repeat their
/// terminal position for the remaining steps, which keeps every slice
/// rectangular (the plotting layer relies on this).
///
/// Memory grows as `steps × particles × 2` doubles; recording is meant for
/// visualisation-sized ensembles, not for production estimates.
#[derive(Debug, Clone)]
pub struct TrajectoryLog {
    data: Array3<f64>,
}

impl TrajectoryLog {
    pub(crate) fn from_flat(
        flat: Vec<f64>,
        steps: usize,
        particles: usize,
    ) -> Result<Self, String> {
        let data = Array3::from_shape_vec((steps, particles, 2), flat)
            .map_err(|e| format!("Trajectory log shape mismatch: {}", e))?;
        Ok(Self { data })
    }

    /// Number of recorded time levels (steps taken + 1).
    pub fn recorded_steps(&self) -> usize {
        self.data.shape()[0]
    }

    /// Number of particles in the log.
    pub fn particles(&self) -> usize {
        self.data.shape()[1]
    }

    /// Position of particle `i` at time level `step`, as `(r, z)`.
    pub fn position(&self, step: usize, i: usize) -> (f64, f64) {
        (self.data[[step, i, 0]], self.data[[step, i, 1]])
    }

    /// Full path of particle `i`, release position first.
    pub fn path(&self, i: usize) -> Vec<(f64, f64)> {
        (0..self.recorded_steps())
            .map(|step| self.position(step, i))
            .collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
