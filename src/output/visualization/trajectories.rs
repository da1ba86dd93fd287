//! Trajectory figure
//!
//! One polyline per displayed particle in the `(r, z)` half-plane, coloured
//! by outcome (green = captured, olive = left the domain, red = unresolved),
//! with the absorbing sphere drawn solid and the unit circle dashed for
//! scale. Trajectories are truncated at their resolution step so frozen
//! repeats do not draw as dots on top of the terminal position.

use crate::output::visualization::PlotConfig;
use crate::simulation::{Domain, Ensemble, TrajectoryLog};
use plotters::prelude::*;
use std::error::Error;

/// Render the first `display` trajectories of a recorded run to a PNG file.
///
/// # Arguments
///
/// * `log` - trajectory log from `run_with_trajectories`
/// * `ensemble` - the ensemble the log belongs to (for the outcome flags)
/// * `domain` - the simulated domain (for the sphere radius)
/// * `display` - how many particles to draw (clamped to the ensemble size)
/// * `output_path` - PNG output path
/// * `config` - optional plot configuration
///
/// # Errors
///
/// Propagates backend/drawing failures; rejects an empty log.
pub fn plot_trajectories(
    log: &TrajectoryLog,
    ensemble: &Ensemble,
    domain: &Domain,
    display: usize,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);

    if log.particles() == 0 || log.recorded_steps() == 0 {
        return Err("Trajectory log is empty".into());
    }
    let display = display.min(log.particles());

    // ====== Axis ranges from the displayed data ======

    let mut r_max = 1.05_f64;
    let (mut z_min, mut z_max) = (-1.05_f64, 1.05_f64);
    for i in 0..display {
        for (r, z) in log.path(i) {
            r_max = r_max.max(r);
            z_min = z_min.min(z);
            z_max = z_max.max(z);
        }
    }
    let pad_r = 0.05 * r_max;
    let pad_z = 0.05 * (z_max - z_min);

    // ====== Chart scaffolding ======

    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..(r_max + pad_r), (z_min - pad_z)..(z_max + pad_z))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    // ====== Trajectories ======

    for i in 0..display {
        let color = config.outcome_color(ensemble.outcomes()[i]);
        let style = ShapeStyle::from(&color).stroke_width(config.line_width);

        let mut path = log.path(i);
        truncate_at_rest(&mut path);

        chart.draw_series(LineSeries::new(path, style))?;
    }

    // ====== Sphere and unit circle ======

    let sphere = circle_points(domain.sphere_radius);
    chart.draw_series(LineSeries::new(
        sphere,
        ShapeStyle::from(&BLACK).stroke_width(2),
    ))?;

    let unit = circle_points(1.0);
    chart.draw_series(DashedLineSeries::new(
        unit,
        6,
        4,
        ShapeStyle::from(&BLACK.mix(0.5)).stroke_width(1),
    ))?;

    root.present()?;
    Ok(())
}

/// Drop the frozen tail a resolved particle repeats after its terminal step.
fn truncate_at_rest(path: &mut Vec<(f64, f64)>) {
    let mut end = path.len();
    while end >= 2 && path[end - 1] == path[end - 2] {
        end -= 1;
    }
    path.truncate(end);
}

/// Sampled right half of a circle of given radius, pole to pole.
fn circle_points(radius: f64) -> Vec<(f64, f64)> {
    const SEGMENTS: usize = 100;
    (0..=SEGMENTS)
        .map(|k| {
            let phi = std::f64::consts::PI * k as f64 / SEGMENTS as f64;
            (radius * phi.sin(), radius * phi.cos())
        })
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================
