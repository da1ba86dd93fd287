//! Output module for estimation results
//!
//! This module moves results across the crate boundary in two directions:
//!
//! - **Tables**: write `(Peclet, radius, Sherwood)` result tables to
//!   delimited text, and read the reference table produced by the external
//!   finite-element solver for cross-validation.
//! - **Visualization**: render recorded trajectories in the `(r, z)`
//!   half-plane with `plotters`, coloured by outcome.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── table.rs            ← Delimited Sherwood tables (read + write)
//! └── visualization/      ← Plots and graphics
//!     ├── mod.rs
//!     ├── config.rs
//!     └── trajectories.rs
//! ```
//!
//! The core never does I/O on its own: everything here is invoked by the
//! driver binaries after the estimators have returned.

pub mod table;
pub mod visualization;

// Re-export commonly used items for convenience
pub use table::{read_sherwood_table, write_sherwood_table, SherwoodRecord, TableConfig, TableError};
pub use visualization::{plot_trajectories, PlotConfig};
