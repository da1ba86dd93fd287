//! Convergence tests for the numerical building blocks
//!
//! These verify the textbook behaviour of bisection and adaptive Simpson on
//! deterministic functions with known answers — the noisy-estimator cases
//! live in the estimator integration tests.

use pesh_rs::numerics::{adaptive_simpson, bisect, BisectionSettings, QuadratureSettings};

mod common;
use common::relative_error;

#[test]
fn test_bisection_iteration_bound_on_step_function() {
    // For a deterministic monotone step, convergence must arrive within
    // ceil(log2((hi - lo) / tol)) iterations — exactly the cap we grant.
    for &crossing in &[0.1, 0.37, 0.5, 0.9] {
        let (lo, hi, tol) = (0.0_f64, 1.0_f64, 1e-7_f64);
        let bound = ((hi - lo) / tol).log2().ceil() as usize;

        let settings = BisectionSettings {
            tolerance: tol,
            max_iterations: bound,
        };
        let result = bisect(
            |x| if x < crossing { -1.0 } else { 1.0 },
            0.0,
            lo,
            hi,
            &settings,
        )
        .unwrap();

        assert!(result.iterations <= bound);
        assert!(
            (result.root - crossing).abs() <= tol,
            "crossing {} missed: {}",
            crossing,
            result.root
        );
    }
}

#[test]
fn test_bisection_smooth_function_accuracy() {
    let settings = BisectionSettings {
        tolerance: 1e-10,
        max_iterations: 64,
    };
    // exp(x) = 2 at x = ln 2.
    let result = bisect(|x: f64| x.exp(), 2.0, 0.0, 1.0, &settings).unwrap();
    assert!(relative_error(result.root, 2.0_f64.ln()) < 1e-9);
}

#[test]
fn test_simpson_polynomial_and_sine() {
    let settings = QuadratureSettings {
        tolerance: 1e-8,
        ..Default::default()
    };

    // ∫₀¹ (3x² + 1) dx = 2, exact for Simpson.
    let poly = adaptive_simpson(|x| 3.0 * x * x + 1.0, 0.0, 1.0, &settings).unwrap();
    assert!((poly.value - 2.0).abs() < 1e-12);
    assert!(poly.tolerance_met);

    // ∫₀^π sin x dx = 2.
    let sine = adaptive_simpson(|x: f64| x.sin(), 0.0, std::f64::consts::PI, &settings).unwrap();
    assert!((sine.value - 2.0).abs() < 1e-8);
    assert!(sine.tolerance_met);
}

#[test]
fn test_simpson_subdivision_count_tracks_tolerance() {
    // Tightening the tolerance must buy more subdivision work, and every
    // tolerance level must still deliver its promised accuracy.
    // ∫₀⁴ 2 sin(2x) e⁻ˣ dx with antiderivative -(2/5) e⁻ˣ (sin 2x + 2 cos 2x).
    let integrand = |x: f64| 2.0 * (2.0 * x).sin() * (-x).exp();
    let antiderivative =
        |x: f64| -(2.0 / 5.0) * (-x).exp() * ((2.0 * x).sin() + 2.0 * (2.0 * x).cos());
    let exact = antiderivative(4.0) - antiderivative(0.0);

    let mut previous_evaluations = 0;
    for &tolerance in &[1e-3, 1e-6, 1e-9] {
        let settings = QuadratureSettings {
            tolerance,
            ..Default::default()
        };
        let result = adaptive_simpson(integrand, 0.0, 4.0, &settings).unwrap();

        assert!(result.tolerance_met);
        assert!((result.value - exact).abs() < tolerance);
        assert!(
            result.evaluations >= previous_evaluations,
            "tighter tolerance used fewer evaluations"
        );
        previous_evaluations = result.evaluations;
    }
}
