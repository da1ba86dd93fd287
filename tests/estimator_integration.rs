//! End-to-end tests of the statistical estimators
//!
//! These exercise the full pipeline — release, stepping, outcome tallies,
//! edge search, quadrature, Sherwood conversion — on parameters small enough
//! to run in seconds. Statistical assertions are deliberately loose: they
//! check reproducibility and orders of magnitude, not point values.

use pesh_rs::estimator::{
    clift_sherwood, hitting_probability, sherwood_from_ensemble, sherwood_from_quadrature,
    SherwoodSettings,
};
use pesh_rs::numerics::{BisectionSettings, QuadratureSettings};
use pesh_rs::simulation::SimulationConfig;

mod common;
use common::short_problem;

#[test]
fn test_high_peclet_probability_is_valid_and_deterministic() {
    // The hardest corner of the parameter space: a nearly-unit sphere at
    // Pe = 10^6, probed just off the axis.
    let problem = short_problem(1.0e6, 0.995);

    let estimate = hitting_probability(&problem, 0.0005, 400, 42).unwrap();
    let p = estimate.probability();
    assert!((0.0..=1.0).contains(&p));
    assert_eq!(
        estimate.hits + estimate.boundary_exits + estimate.unresolved,
        400
    );

    // Same seed, same estimate — bit for bit.
    let repeat = hitting_probability(&problem, 0.0005, 400, 42).unwrap();
    assert_eq!(estimate.hits, repeat.hits);
    assert_eq!(estimate.boundary_exits, repeat.boundary_exits);
    assert_eq!(estimate.unresolved, repeat.unresolved);

    // Different seeds scatter like a binomial sample, not like a different
    // physical problem: a handful of runs stays within a generous multiple
    // of sqrt(p(1-p)/n) ~ 0.025.
    let others = [
        hitting_probability(&problem, 0.0005, 400, 7).unwrap(),
        hitting_probability(&problem, 0.0005, 400, 1234).unwrap(),
    ];
    for other in &others {
        assert!((other.probability() - p).abs() < 0.2);
    }
}

#[test]
fn test_probability_decreases_with_release_radius() {
    // Statistical monotonicity: far outside the capture tube the hitting
    // probability must not exceed the near-axis value. Sampled with enough
    // trials that an inversion would be a many-sigma event.
    let problem = short_problem(1.0e4, 0.9);

    let near = hitting_probability(&problem, 0.02, 300, 11).unwrap();
    let far = hitting_probability(&problem, 0.45, 300, 11).unwrap();

    assert!(
        near.probability() >= far.probability(),
        "p({}) = {} < p({}) = {}",
        near.radius,
        near.probability(),
        far.radius,
        far.probability()
    );
}

#[test]
fn test_quadrature_and_direct_paths_agree() {
    // The two Sherwood paths estimate the same capture area from different
    // machinery; they must land in the same ballpark.
    let problem = short_problem(1.0e4, 0.9);

    let settings = SherwoodSettings {
        integrand_trials: 100,
        search_trials: 200,
        edge_threshold: 0.01,
        disk_radius: 0.2,
        bisection: BisectionSettings {
            tolerance: 5e-3,
            max_iterations: 40,
        },
        quadrature: QuadratureSettings {
            tolerance: 2e-3,
            max_depth: 5,
            min_interval: 1e-6,
        },
    };

    let quadrature = sherwood_from_quadrature(&problem, &settings, 21).unwrap();
    let direct = sherwood_from_ensemble(&problem, 0.2, 0.01, 100, 22).unwrap();

    assert!(quadrature.sherwood > 0.0);
    assert!(direct.sherwood > 0.0);
    let ratio = quadrature.sherwood / direct.sherwood;
    assert!(
        (0.25..=4.0).contains(&ratio),
        "paths disagree: quadrature = {}, direct = {}",
        quadrature.sherwood,
        direct.sherwood
    );
}

#[test]
fn test_direct_path_hit_fractions_fall_off_with_radius() {
    let problem = short_problem(1.0e4, 0.9);
    let direct = sherwood_from_ensemble(&problem, 0.2, 0.02, 150, 33).unwrap();

    // Innermost annulus captures at least as often as the outermost.
    let first = direct.per_radius.first().unwrap().1;
    let last = direct.per_radius.last().unwrap().1;
    assert!(first >= last);

    // The report accounts for every released particle.
    assert_eq!(direct.counts.total(), direct.per_radius.len() * 150);
}

#[test]
fn test_low_peclet_limit_reduces_to_diffusive_baseline() {
    // As Pe → 0 the advective channel vanishes and the combined Sherwood
    // number is the Clift value, which tends to 1.
    let mut problem = short_problem(1.0e-3, 0.5);
    problem.simulation = SimulationConfig::new(1e-2, 10_000);

    let settings = SherwoodSettings {
        integrand_trials: 20,
        search_trials: 50,
        edge_threshold: 0.01,
        disk_radius: 0.5,
        bisection: BisectionSettings::default(),
        quadrature: QuadratureSettings {
            tolerance: 1e-3,
            max_depth: 6,
            min_interval: 1e-6,
        },
    };

    let estimate = sherwood_from_quadrature(&problem, &settings, 5).unwrap();
    let combined = clift_sherwood(problem.peclet) + estimate.sherwood;
    assert!(
        (combined - 1.0).abs() < 0.05,
        "combined Sherwood {} far from the diffusive limit",
        combined
    );
}

#[test]
fn test_quadrature_estimate_is_reproducible() {
    let problem = short_problem(1.0e4, 0.9);
    let settings = SherwoodSettings {
        integrand_trials: 40,
        search_trials: 80,
        edge_threshold: 0.01,
        disk_radius: 0.2,
        bisection: BisectionSettings {
            tolerance: 1e-2,
            max_iterations: 20,
        },
        quadrature: QuadratureSettings {
            tolerance: 5e-3,
            max_depth: 4,
            min_interval: 1e-6,
        },
    };

    let a = sherwood_from_quadrature(&problem, &settings, 99).unwrap();
    let b = sherwood_from_quadrature(&problem, &settings, 99).unwrap();
    assert_eq!(a.sherwood, b.sherwood);
    assert_eq!(a.edge, b.edge);
    assert_eq!(a.inner.evaluations, b.inner.evaluations);
}
