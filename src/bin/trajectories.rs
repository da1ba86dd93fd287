//! Render a trajectory figure for one (Péclet, radius) pair
//!
//! Releases a small grid of particles, records their full paths, and draws
//! them coloured by outcome together with the sphere.
//!
//! ```bash
//! cargo run --release --bin trajectories
//! ```

use pesh_rs::output::visualization::{plot_trajectories, PlotConfig};
use pesh_rs::physics::{BrownianNoise, StokesFlow};
use pesh_rs::simulation::{
    Domain, Ensemble, EulerMaruyama, ReleaseGrid, SimulationConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const OUTPUT_PATH: &str = "trajectories.png";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let peclet = 500.0;
    let sphere_radius = 0.7;
    let display = 40;

    let flow = StokesFlow::new(sphere_radius)?;
    let noise = BrownianNoise::from_peclet(peclet)?;
    let domain = Domain::standard(sphere_radius);
    let config = SimulationConfig::new(1e-2, 20_000);

    let grid = ReleaseGrid {
        disk_radius: 1.0,
        radial_step: 0.025,
        height: 5.0,
        trials: 1,
    };
    let mut ensemble = Ensemble::release_grid(&grid)?;
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let (report, log) = EulerMaruyama::new().run_with_trajectories(
        &mut ensemble,
        &flow,
        &noise,
        &domain,
        &config,
        &mut rng,
    )?;

    println!(
        "{} particles, {} steps, {} captured / {} exited / {} unresolved",
        ensemble.len(),
        report.steps_taken,
        report.counts.hit_sphere,
        report.counts.hit_boundary,
        report.counts.unresolved
    );

    let plot_config = PlotConfig::trajectories(format!("Pe = {}", peclet));
    plot_trajectories(&log, &ensemble, &domain, display, OUTPUT_PATH, Some(&plot_config))?;
    println!("Wrote {}", OUTPUT_PATH);

    Ok(())
}
