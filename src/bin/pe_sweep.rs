//! Sweep Péclet numbers and sphere radii, write the Sherwood table
//!
//! Runs the quadrature estimator over a Pe × radius grid, persists the
//! results as a delimited table, and — when a finite-element reference table
//! is present next to the output — prints the modified Sherwood ratio for
//! each matching row.
//!
//! ```bash
//! cargo run --release --bin pe_sweep
//! ```

use pesh_rs::estimator::{
    clift_sherwood, modified_sherwood, sherwood_from_quadrature, CaptureProblem, SherwoodSettings,
};
use pesh_rs::output::table::{
    read_sherwood_table, write_sherwood_table, SherwoodRecord, TableConfig,
};

const OUTPUT_PATH: &str = "pe_vs_sh.csv";
const REFERENCE_PATH: &str = "fem_pe_vs_sh.csv";
const SEED: u64 = 42;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let peclet_values = [1.0e5, 1.0e6, 1.0e7];
    // Radius parameter is the gap 1 - a, the quantity the reference table
    // is keyed by.
    let gap_values = [0.05, 0.01, 0.005];

    let mut settings = SherwoodSettings::default();
    settings.search_trials = 400;

    let mut records = Vec::new();

    for &gap in &gap_values {
        for &peclet in &peclet_values {
            let sphere_radius = 1.0 - gap;
            println!("radius = {}, peclet = {:e}", sphere_radius, peclet);

            let problem = CaptureProblem::new(peclet, sphere_radius)?;
            let estimate = sherwood_from_quadrature(&problem, &settings, SEED)?;

            println!(
                "  Sh = {:.4} (edge = {:?}, tolerance met: {})",
                estimate.sherwood, estimate.edge, estimate.tolerance_met
            );

            records.push(SherwoodRecord {
                peclet,
                radius: gap,
                sherwood: estimate.sherwood,
            });
        }
    }

    let config = TableConfig::default()
        .with_metadata("estimator", "adaptive-simpson quadrature")
        .with_metadata("seed", &SEED.to_string());
    write_sherwood_table(&records, OUTPUT_PATH, Some(&config))?;
    println!("Wrote {} rows to {}", records.len(), OUTPUT_PATH);

    // ====== Optional comparison against the finite-element reference ======

    if std::path::Path::new(REFERENCE_PATH).exists() {
        let reference = read_sherwood_table(REFERENCE_PATH, None)?;
        println!("\nComparison against {} ({} rows):", REFERENCE_PATH, reference.len());

        for record in &records {
            let matching = reference.iter().find(|r| {
                (r.peclet - record.peclet).abs() / record.peclet < 1e-9
                    && (r.radius - record.radius).abs() < 1e-9
            });
            if let Some(fem) = matching {
                let a = 1.0 - record.radius;
                let ours = modified_sherwood(
                    clift_sherwood(record.peclet) + record.sherwood,
                    record.peclet,
                    a,
                );
                let theirs = modified_sherwood(fem.sherwood, record.peclet, a);
                println!(
                    "  Pe = {:>10.0}  gap = {:<6} ours = {:.4}  fem = {:.4}",
                    record.peclet, record.radius, ours, theirs
                );
            }
        }
    }

    Ok(())
}
