//! pesh-rs: Péclet–Sherwood Mass-Transfer Estimation
//!
//! A framework for estimating mass-transfer rates (Sherwood numbers) toward an
//! absorbing sphere held in Stokes flow, as a function of the Péclet number.
//! The estimate is built from Brownian-dynamics trajectories: an ensemble of
//! tracer particles is advected by the analytic Stokes velocity field,
//! perturbed by Péclet-scaled Gaussian noise, and classified by whether it
//! reaches the sphere before leaving the domain.
//!
//! # Architecture
//!
//! pesh-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical fields define the drift and noise (what moves the particles)
//!    - The stepper and estimators provide the methods (how particles are
//!      moved and how statistics are extracted from the outcomes)
//!
//! 2. **Reproducibility**
//!    - Every stochastic operation takes an explicit seed; there is no global
//!      random state anywhere in the crate
//!    - The whole ensemble advances one time step at a time, so a seed fully
//!      determines every trajectory
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐
//! │  StokesFlow  │   │ BrownianNoise │      (physics)
//! └──────┬───────┘   └──────┬────────┘
//!        └────────┬─────────┘
//!        ┌────────▼──────────┐
//!        │   EulerMaruyama   │     advances an Ensemble inside a Domain
//!        └────────┬──────────┘
//!        ┌────────▼──────────┐
//!        │hitting_probability│     fraction of an ensemble absorbed
//!        └────────┬──────────┘
//!        ┌────────▼──────────┐
//!        │  bisect + simpson │     edge search + capture-area quadrature
//!        └────────┬──────────┘
//!        ┌────────▼──────────┐
//!        │  Sherwood number  │     Sh = (Pe / 4) · r_eff²
//!        └───────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pesh_rs::estimator::{CaptureProblem, SherwoodSettings, sherwood_from_quadrature};
//!
//! let problem = CaptureProblem::new(1.0e6, 0.995)?;
//! let estimate = sherwood_from_quadrature(&problem, &SherwoodSettings::default(), 42)?;
//! println!("Sh = {}", estimate.sherwood);
//! ```
//!
//! # Modules
//!
//! - [`physics`]: drift and noise fields (equations)
//! - [`simulation`]: domain, ensembles and the Euler–Maruyama stepper
//! - [`numerics`]: bisection and adaptive Simpson quadrature
//! - [`estimator`]: hitting probabilities and Sherwood aggregation
//! - [`output`]: result tables and trajectory figures

pub mod physics;
pub mod simulation;
pub mod numerics;
pub mod estimator;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use pesh_rs::prelude::*;
    //! ```
    pub use crate::physics::{BrownianNoise, DriftField, StokesFlow};
    pub use crate::simulation::{
        Domain, Ensemble, EulerMaruyama, Outcome, OutcomeCounts, ReleaseGrid, SimulationConfig,
        SimulationReport,
    };
    pub use crate::numerics::{adaptive_simpson, bisect, BisectionSettings, QuadratureSettings};
    pub use crate::estimator::{
        clift_sherwood, hitting_probability, sherwood_from_ensemble, sherwood_from_quadrature,
        CaptureProblem, HittingEstimate, SherwoodSettings,
    };
}
