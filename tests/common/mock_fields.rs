//! Mock drift fields for testing
//!
//! These fields have trivially predictable trajectories, making them ideal
//! for validating collision classification and stepper bookkeeping without
//! any Stokes-flow subtleties.

use nalgebra::Vector2;
use pesh_rs::physics::DriftField;

/// Uniform downward flow: every particle moves in a straight line.
pub struct UniformFlow {
    pub velocity: Vector2<f64>,
}

impl UniformFlow {
    /// Unit-speed flow straight down the axis.
    pub fn downward() -> Self {
        Self {
            velocity: Vector2::new(0.0, -1.0),
        }
    }
}

impl DriftField for UniformFlow {
    fn velocity(&self, _r: f64, _z: f64) -> Vector2<f64> {
        self.velocity
    }

    fn name(&self) -> &str {
        "uniform flow"
    }
}

/// No drift at all: motion is pure diffusion.
pub struct StillFluid;

impl DriftField for StillFluid {
    fn velocity(&self, _r: f64, _z: f64) -> Vector2<f64> {
        Vector2::zeros()
    }

    fn name(&self) -> &str {
        "still fluid"
    }
}
