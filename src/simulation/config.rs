//! Stepper configuration

/// Time discretisation for one simulation run
///
/// # Design
///
/// The step size and the step budget are the only two knobs of the stepper;
/// everything geometric lives in [`crate::simulation::Domain`] and everything
/// physical in [`crate::physics`]. Keeping them in one small value object
/// (instead of loose function arguments or captured closure state) makes the
/// stepper contract explicit and lets callers share one configuration across
/// many ensembles.
///
/// # Choosing `dt`
///
/// The explicit Euler–Maruyama scheme is first-order in the drift and
/// half-order in the noise. A `dt` of `1e-2` resolves the unit-speed transit
/// from the default release height comfortably; very thin concentration
/// boundary layers (high Péclet with `a` close to 1) may need a smaller step
/// to resolve the near-surface creep.
///
/// # Example
///
/// ```rust
/// use pesh_rs::simulation::SimulationConfig;
///
/// let config = SimulationConfig { dt: 5e-3, max_steps: 50_000 };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    /// Time step `dt` (non-dimensional time units)
    pub dt: f64,

    /// Step budget: particles still unresolved after this many steps are
    /// reported as such, never advanced further.
    pub max_steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 1e-2,
            max_steps: 100_000,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with an explicit step size and budget.
    pub fn new(dt: f64, max_steps: usize) -> Self {
        Self { dt, max_steps }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(format!("Time step must be positive, got {}", self.dt));
        }
        if self.max_steps == 0 {
            return Err("Step budget must be greater than 0".to_string());
        }
        Ok(())
    }
}
