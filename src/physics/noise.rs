//! Péclet-scaled Brownian noise
//!
//! With unit characteristic length and velocity (see [`crate::physics`]), the
//! advection–diffusion balance leaves a single free parameter: the Péclet
//! number `Pe = U L / D`. The tracer diffusivity is therefore `D = 1 / Pe`,
//! and the Euler–Maruyama increment over a step `dt` is
//!
//! ```text
//! dx = v(x) dt + sqrt(2 dt / Pe) · N(0, 1)      (per coordinate)
//! ```
//!
//! [`BrownianNoise`] owns the `sqrt(2 / Pe)` amplitude so the stepper never
//! re-derives it, and composes with any [`crate::physics::DriftField`]
//! without additional state.

/// Isotropic Brownian diffusion amplitude for a given Péclet number
#[derive(Debug, Clone, Copy)]
pub struct BrownianNoise {
    peclet: f64,
    amplitude: f64,
}

impl BrownianNoise {
    /// Build the noise model for Péclet number `pe`.
    ///
    /// # Errors
    ///
    /// `pe` must be positive and finite. The diffusion-free limit is reached
    /// by letting `pe → ∞`, never by `pe = 0`.
    pub fn from_peclet(peclet: f64) -> Result<Self, String> {
        if !(peclet.is_finite() && peclet > 0.0) {
            return Err(format!("Peclet number must be positive, got {}", peclet));
        }
        Ok(Self {
            peclet,
            amplitude: (2.0 / peclet).sqrt(),
        })
    }

    /// Péclet number this model was built from.
    pub fn peclet(&self) -> f64 {
        self.peclet
    }

    /// Noise amplitude `sqrt(2 / Pe)` per unit of `sqrt(time)`.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Standard deviation of one Gaussian increment over a step `dt`,
    /// i.e. `sqrt(2 dt / Pe)`.
    pub fn step_scale(&self, dt: f64) -> f64 {
        self.amplitude * dt.sqrt()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_peclet() {
        assert!(BrownianNoise::from_peclet(0.0).is_err());
        assert!(BrownianNoise::from_peclet(-10.0).is_err());
        assert!(BrownianNoise::from_peclet(f64::NAN).is_err());
        assert!(BrownianNoise::from_peclet(f64::INFINITY).is_err());
    }

    #[test]
    fn test_amplitude_scaling() {
        let noise = BrownianNoise::from_peclet(2.0).unwrap();
        assert!((noise.amplitude() - 1.0).abs() < 1e-15);

        // Quadrupling Pe halves the amplitude.
        let tighter = BrownianNoise::from_peclet(8.0).unwrap();
        assert!((tighter.amplitude() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_step_scale() {
        let noise = BrownianNoise::from_peclet(2.0).unwrap();
        assert!((noise.step_scale(0.25) - 0.5).abs() < 1e-15);
    }
}
