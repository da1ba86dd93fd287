//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing trajectory plots
///
/// # Fields
///
/// - `width`, `height`: dimensions in pixels
/// - `title`: plot title
/// - `xlabel`, `ylabel`: axis labels (cylindrical `r` and `z` by default)
/// - outcome colours: one per [`crate::simulation::Outcome`] variant
/// - `background`: background colour
/// - `line_width`: trajectory line thickness in pixels
/// - `show_grid`: whether to draw grid lines
///
/// # Example
///
/// ```rust
/// use pesh_rs::output::visualization::PlotConfig;
///
/// let mut config = PlotConfig::trajectories("Pe = 10^6");
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 1024)
    pub height: u32,

    /// Plot title (default: "Trajectories")
    pub title: String,

    /// X-axis label (default: "r")
    pub xlabel: String,

    /// Y-axis label (default: "z")
    pub ylabel: String,

    /// Colour for trajectories that hit the sphere (default: green `#2a2`)
    pub hit_color: RGBColor,

    /// Colour for trajectories that left the domain (default: olive `#aa2`)
    pub boundary_color: RGBColor,

    /// Colour for unresolved trajectories (default: red `#a22`)
    pub unresolved_color: RGBColor,

    /// Background colour (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 1)
    pub line_width: u32,

    /// Show grid lines (default: false)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            title: "Trajectories".to_string(),
            xlabel: "r".to_string(),
            ylabel: "z".to_string(),
            hit_color: RGBColor(0x22, 0xaa, 0x22),
            boundary_color: RGBColor(0xaa, 0xaa, 0x22),
            unresolved_color: RGBColor(0xaa, 0x22, 0x22),
            background: WHITE,
            line_width: 1,
            show_grid: false,
        }
    }
}

impl PlotConfig {
    /// Create config for trajectory figures with a custom title.
    pub fn trajectories(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Colour for the outcome of one trajectory.
    pub(crate) fn outcome_color(&self, outcome: crate::simulation::Outcome) -> RGBColor {
        use crate::simulation::Outcome;
        match outcome {
            Outcome::HitSphere => self.hit_color,
            Outcome::HitBoundary => self.boundary_color,
            Outcome::Unresolved => self.unresolved_color,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
