//! Visualization of recorded trajectories
//!
//! Renders the `(r, z)` half-plane with the `plotters` library: one polyline
//! per particle coloured by its outcome, the absorbing sphere drawn to
//! scale, and the unit circle dashed for reference.
//!
//! # Organization
//!
//! - **config**: shared plot configuration ([`PlotConfig`])
//! - **trajectories**: the trajectory figure ([`plot_trajectories`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pesh_rs::output::visualization::{plot_trajectories, PlotConfig};
//!
//! let (report, log) = stepper.run_with_trajectories(/* ... */)?;
//! plot_trajectories(&log, &ensemble, &domain, 10, "trajectories.png", None)?;
//! ```

pub mod config;
pub mod trajectories;

pub use config::PlotConfig;
pub use trajectories::plot_trajectories;
