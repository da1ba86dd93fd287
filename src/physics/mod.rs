//! Physical fields
//!
//! This module provides the two ingredients of the particle dynamics: a
//! deterministic drift velocity field and a stochastic diffusion amplitude.
//! Everything downstream (stepper, estimators) consumes them through the
//! [`DriftField`] trait and the [`BrownianNoise`] value object, so the same
//! numerics run unchanged against the analytic Stokes field or against the
//! synthetic fields used in tests.
//!
//! # Non-dimensionalisation
//!
//! One convention, used everywhere in this crate:
//!
//! - **Length** is measured in units of the outer length scale; the sphere
//!   radius `a` satisfies `0 < a < 1`.
//! - **Velocity** is measured in units of the far-field speed; the undisturbed
//!   flow is exactly `(0, -1)` in cylindrical `(r, z)` components, i.e. unit
//!   speed directed downward along the axis.
//! - **Time** follows from the two above; the diffusivity is `D = 1 / Pe`, so
//!   the per-coordinate Gaussian increment over a step `dt` has standard
//!   deviation `sqrt(2 dt / Pe)`.
//!
//! The sphere is centred at the origin. Particles are released on a plane
//! above it (`z > 0`) and carried down toward the sphere by the drift.
//!
//! # Architecture
//!
//! Fields are **separate from the numerical stepper**:
//! - the field provides the **equations** (drift velocity, noise amplitude)
//! - the stepper provides the **method** to advance particles under them
//!
//! This separation allows the same stepper to run against different fields
//! (analytic Stokes flow, uniform test flow) and the same field to be probed
//! by different consumers (stepper, flux weights in the quadrature path).

pub mod flow;
pub mod noise;

pub use flow::{DriftField, StokesFlow};
pub use noise::BrownianNoise;
