//! Helper functions for integration tests

use pesh_rs::estimator::CaptureProblem;
use pesh_rs::physics::BrownianNoise;
use pesh_rs::simulation::SimulationConfig;

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Noise so weak the dynamics is effectively deterministic.
pub fn quiet_noise() -> BrownianNoise {
    BrownianNoise::from_peclet(1.0e18).unwrap()
}

/// A standard problem with a test-sized step budget.
pub fn short_problem(peclet: f64, sphere_radius: f64) -> CaptureProblem {
    let mut problem = CaptureProblem::new(peclet, sphere_radius).unwrap();
    problem.simulation = SimulationConfig::new(1e-2, 20_000);
    problem
}
