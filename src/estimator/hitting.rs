//! Hitting-probability estimation
//!
//! The elementary statistic of the whole pipeline: release `trials`
//! particles at one radius on the release plane, advect them down with
//! Péclet-scaled noise, and count how many cross the sphere surface before
//! leaving the domain. The fraction is a binomial estimate — run-to-run
//! scatter shrinks as `1/sqrt(trials)` and costs grow linearly.

use crate::physics::{BrownianNoise, StokesFlow};
use crate::simulation::{Domain, Ensemble, EulerMaruyama, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =================================================================================================
// Capture Problem
// =================================================================================================

/// One (Péclet, sphere radius) transport problem
///
/// Bundles the physical parameters with the geometry and time discretisation
/// so the estimators take a single value object instead of loose arguments.
/// The same problem can be probed at many radii and trial counts.
///
/// # Example
///
/// ```rust
/// use pesh_rs::estimator::{hitting_probability, CaptureProblem};
///
/// let problem = CaptureProblem::new(1.0e4, 0.9).unwrap();
/// let estimate = hitting_probability(&problem, 0.02, 50, 7).unwrap();
/// assert!(estimate.probability() >= 0.0 && estimate.probability() <= 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CaptureProblem {
    /// Péclet number, `Pe > 0`
    pub peclet: f64,

    /// Absorbing sphere radius `a`, `0 < a < 1`
    pub sphere_radius: f64,

    /// Domain geometry
    pub domain: Domain,

    /// Height of the release plane above the sphere centre
    pub release_height: f64,

    /// Time discretisation shared by every ensemble of this problem
    pub simulation: SimulationConfig,
}

impl CaptureProblem {
    /// Standard problem: default box, release plane at `z = 5`, default
    /// time discretisation.
    pub fn new(peclet: f64, sphere_radius: f64) -> Result<Self, String> {
        let problem = Self {
            peclet,
            sphere_radius,
            domain: Domain::standard(sphere_radius),
            release_height: 5.0,
            simulation: SimulationConfig::default(),
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Validate all parameters together.
    pub fn validate(&self) -> Result<(), String> {
        BrownianNoise::from_peclet(self.peclet)?;
        StokesFlow::new(self.sphere_radius)?;
        self.domain.validate()?;
        self.simulation.validate()?;
        if self.domain.sphere_radius != self.sphere_radius {
            return Err(format!(
                "Domain sphere radius {} disagrees with problem radius {}",
                self.domain.sphere_radius, self.sphere_radius
            ));
        }
        if !(self.release_height > 0.0 && self.release_height < self.domain.ceiling_height) {
            return Err(format!(
                "Release height {} must sit between the sphere and the ceiling {}",
                self.release_height, self.domain.ceiling_height
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// Hitting Estimate
// =================================================================================================

/// One hitting-probability sample with its diagnostics
///
/// The unresolved count is part of the estimate on purpose: unresolved
/// particles count as non-hits, so a large `unresolved_fraction` flags a
/// downward-biased probability that needs a bigger step budget.
#[derive(Debug, Clone, Copy)]
pub struct HittingEstimate {
    /// Release radius this ensemble started from
    pub radius: f64,

    /// Péclet number of the run
    pub peclet: f64,

    /// Ensemble size
    pub trials: usize,

    /// Particles absorbed by the sphere
    pub hits: usize,

    /// Particles that left through an outer surface
    pub boundary_exits: usize,

    /// Particles starved by the step budget
    pub unresolved: usize,

    /// Steps the run actually took
    pub steps_taken: usize,
}

impl HittingEstimate {
    /// Hit fraction in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        self.hits as f64 / self.trials as f64
    }

    /// Fraction of the ensemble left unresolved.
    pub fn unresolved_fraction(&self) -> f64 {
        self.unresolved as f64 / self.trials as f64
    }

    /// Binomial standard error `sqrt(p (1 - p) / trials)`.
    pub fn standard_error(&self) -> f64 {
        let p = self.probability();
        (p * (1.0 - p) / self.trials as f64).sqrt()
    }
}

// =================================================================================================
// Estimator
// =================================================================================================

/// Estimate the probability that a particle released at `radius` hits the
/// sphere before leaving the domain.
///
/// Builds a fresh single-radius ensemble, runs the stepper with an RNG
/// seeded from `seed`, and tallies the outcomes. Stateless: two calls with
/// the same arguments return the identical estimate, two calls with
/// different seeds return independent binomial samples.
///
/// # Errors
///
/// Invalid problem parameters or `trials == 0`. Step-budget starvation is
/// NOT an error — it shows up in the returned counts.
pub fn hitting_probability(
    problem: &CaptureProblem,
    radius: f64,
    trials: usize,
    seed: u64,
) -> Result<HittingEstimate, String> {
    problem.validate()?;

    let flow = StokesFlow::new(problem.sphere_radius)?;
    let noise = BrownianNoise::from_peclet(problem.peclet)?;
    let mut ensemble = Ensemble::release_at(radius, problem.release_height, trials)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let report = EulerMaruyama::new().run(
        &mut ensemble,
        &flow,
        &noise,
        &problem.domain,
        &problem.simulation,
        &mut rng,
    )?;

    let counts = report.counts;
    Ok(HittingEstimate {
        radius,
        peclet: problem.peclet,
        trials,
        hits: counts.hit_sphere,
        boundary_exits: counts.hit_boundary,
        unresolved: counts.unresolved,
        steps_taken: report.steps_taken,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
