//! Euler–Maruyama trajectory stepper
//!
//! # Mathematical Background
//!
//! The tracer dynamics is the overdamped Langevin equation
//!
//! ```text
//! dX = v(X) dt + sqrt(2 / Pe) dW
//! ```
//!
//! discretised with the explicit Euler–Maruyama scheme:
//!
//! ```text
//! X_{n+1} = X_n + v(X_n) dt + sqrt(2 dt / Pe) · G_n ,   G_n ~ N(0, 1)²
//! ```
//!
//! first-order in the drift, strong order 1/2 in the noise — the standard
//! workhorse for ensemble statistics where only the law of the endpoint
//! matters, not pathwise accuracy.
//!
//! # Ensemble Semantics
//!
//! The whole ensemble advances one `dt` at a time:
//!
//! 1. draw one Gaussian pair per particle from the caller's seeded RNG
//!    (always sequentially, so the seed fully determines the run);
//! 2. apply the position update to every *unresolved* particle — resolved
//!    particles are frozen so the vectorised pass stays well defined;
//! 3. classify each updated position against the [`Domain`]; sphere capture
//!    is tested before boundary exit, so ties go to the sphere.
//!
//! Gaussians are drawn for every particle slot each step, resolved or not.
//! That wastes a few draws but keeps the consumption pattern independent of
//! the outcomes, which is what makes trajectory counts comparable across
//! runs with the same seed.
//!
//! The position/outcome pass itself carries no sequential dependency, so with
//! the `parallel` feature it switches to Rayon above the
//! [`crate::simulation::parallel_threshold`] — results are identical either
//! way because the noise was already drawn.
//!
//! # Failure Semantics
//!
//! The stepper fails only on invalid configuration (empty ensemble, bad `dt`
//! or geometry) or on a numerically exploded position (NaN/∞). Exhausting
//! the step budget is a normal outcome: leftover particles are reported as
//! [`Outcome::Unresolved`] in the [`SimulationReport`].

use crate::physics::{BrownianNoise, DriftField};
use crate::simulation::{
    self, Domain, Ensemble, Outcome, SimulationConfig, SimulationReport, TrajectoryLog,
};
use rand::Rng;
use rand_distr::StandardNormal;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =================================================================================================
// Euler–Maruyama Stepper
// =================================================================================================

/// Explicit Euler–Maruyama integrator for particle ensembles
///
/// # Example
///
/// ```rust
/// use pesh_rs::physics::{BrownianNoise, StokesFlow};
/// use pesh_rs::simulation::{Domain, Ensemble, EulerMaruyama, SimulationConfig};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let flow = StokesFlow::new(0.9).unwrap();
/// let noise = BrownianNoise::from_peclet(1.0e4).unwrap();
/// let domain = Domain::standard(0.9);
/// let config = SimulationConfig::default();
///
/// let mut ensemble = Ensemble::release_at(0.05, 5.0, 32).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
///
/// let report = EulerMaruyama::new()
///     .run(&mut ensemble, &flow, &noise, &domain, &config, &mut rng)
///     .unwrap();
/// assert_eq!(report.counts.total(), 32);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerMaruyama;

impl EulerMaruyama {
    /// Create a new stepper.
    pub fn new() -> Self {
        Self
    }

    /// Advance `ensemble` until every particle resolves or the step budget
    /// runs out.
    pub fn run<R: Rng>(
        &self,
        ensemble: &mut Ensemble,
        drift: &dyn DriftField,
        noise: &BrownianNoise,
        domain: &Domain,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<SimulationReport, String> {
        self.run_inner(ensemble, drift, noise, domain, config, rng, None)
    }

    /// Advance `ensemble` while recording every intermediate position.
    ///
    /// Memory grows as `steps × particles` — meant for visualisation-sized
    /// ensembles, not production estimates.
    pub fn run_with_trajectories<R: Rng>(
        &self,
        ensemble: &mut Ensemble,
        drift: &dyn DriftField,
        noise: &BrownianNoise,
        domain: &Domain,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<(SimulationReport, TrajectoryLog), String> {
        let mut recorder = Vec::new();
        let report = self.run_inner(
            ensemble,
            drift,
            noise,
            domain,
            config,
            rng,
            Some(&mut recorder),
        )?;
        let log = TrajectoryLog::from_flat(recorder, report.steps_taken + 1, ensemble.len())?;
        Ok((report, log))
    }

    fn run_inner<R: Rng>(
        &self,
        ensemble: &mut Ensemble,
        drift: &dyn DriftField,
        noise: &BrownianNoise,
        domain: &Domain,
        config: &SimulationConfig,
        rng: &mut R,
        mut recorder: Option<&mut Vec<f64>>,
    ) -> Result<SimulationReport, String> {
        // ====== Step 1: Validation ======

        config.validate()?;
        domain.validate()?;
        if ensemble.is_empty() {
            return Err("Cannot simulate an empty ensemble".to_string());
        }

        let n = ensemble.len();
        let dt = config.dt;
        let scale = noise.step_scale(dt);

        // ====== Step 2: Setup ======

        // Classify release positions: a mis-configured grid can place
        // particles inside the sphere or outside the box from the start.
        for i in 0..n {
            if let Some(resolved) = domain.classify(ensemble.r[i], ensemble.z[i]) {
                ensemble.outcomes[i] = resolved;
            }
        }

        if let Some(rec) = recorder.as_deref_mut() {
            record_positions(ensemble, rec);
        }

        // One Gaussian pair per particle per step, reused across steps.
        let mut gauss = vec![0.0_f64; 2 * n];
        let mut steps_taken = 0;

        // ====== Step 3: Time Integration ======

        for step in 0..config.max_steps {
            if ensemble.unresolved_count() == 0 {
                break;
            }

            // Sequential draws: the seed alone determines the whole run.
            for g in gauss.iter_mut() {
                *g = rng.sample(StandardNormal);
            }

            update_ensemble(ensemble, drift, domain, dt, scale, &gauss);

            steps_taken = step + 1;
            simulation::validate_positions(ensemble, steps_taken)?;

            if let Some(rec) = recorder.as_deref_mut() {
                record_positions(ensemble, rec);
            }
        }

        // ====== Step 4: Build Result ======

        let mut report = SimulationReport::new(steps_taken, ensemble.counts(), dt);
        report.add_metadata("drift", drift.name());
        report.add_metadata("peclet", &noise.peclet().to_string());
        report.add_metadata("particles", &n.to_string());
        report.add_metadata("step budget", &config.max_steps.to_string());

        Ok(report)
    }
}

// =================================================================================================
// Per-Step Update Pass
// =================================================================================================

/// Advance one particle by one step. No-op for resolved particles.
#[inline]
fn advance_particle(
    drift: &dyn DriftField,
    domain: &Domain,
    dt: f64,
    scale: f64,
    r: &mut f64,
    z: &mut f64,
    outcome: &mut Outcome,
    g_r: f64,
    g_z: f64,
) {
    if *outcome != Outcome::Unresolved {
        return;
    }

    let v = drift.velocity(*r, *z);
    let mut r_new = *r + v.x * dt + scale * g_r;
    let z_new = *z + v.y * dt + scale * g_z;

    // A noise kick across the axis lands on the mirror point; the radial
    // coordinate stays non-negative.
    if r_new < 0.0 {
        r_new = -r_new;
    }

    *r = r_new;
    *z = z_new;

    if let Some(resolved) = domain.classify(r_new, z_new) {
        *outcome = resolved;
    }
}

/// One whole-ensemble update: every unresolved particle advances by `dt`.
fn update_ensemble(
    ensemble: &mut Ensemble,
    drift: &dyn DriftField,
    domain: &Domain,
    dt: f64,
    scale: f64,
    gauss: &[f64],
) {
    let n = ensemble.len();

    #[cfg(feature = "parallel")]
    if n > simulation::parallel_threshold() {
        let r = ensemble.r.as_mut_slice();
        let z = ensemble.z.as_mut_slice();
        r.par_iter_mut()
            .zip(z.par_iter_mut())
            .zip(ensemble.outcomes.par_iter_mut())
            .zip(gauss.par_chunks_exact(2))
            .for_each(|(((ri, zi), oi), g)| {
                advance_particle(drift, domain, dt, scale, ri, zi, oi, g[0], g[1]);
            });
        return;
    }

    for i in 0..n {
        let (mut ri, mut zi, mut oi) = (ensemble.r[i], ensemble.z[i], ensemble.outcomes[i]);
        advance_particle(
            drift,
            domain,
            dt,
            scale,
            &mut ri,
            &mut zi,
            &mut oi,
            gauss[2 * i],
            gauss[2 * i + 1],
        );
        ensemble.r[i] = ri;
        ensemble.z[i] = zi;
        ensemble.outcomes[i] = oi;
    }
}

/// Append the current ensemble positions to a flat trajectory recorder.
fn record_positions(ensemble: &Ensemble, recorder: &mut Vec<f64>) {
    for i in 0..ensemble.len() {
        recorder.push(ensemble.r[i]);
        recorder.push(ensemble.z[i]);
    }
}

// =================================================================================================
// Tests
// =================================================================================================
