//! Headless segregation runner
//!
//! Runs the simulation from CLI flags or a TOML config file and prints a
//! text or JSON report.

use std::path::PathBuf;

use clap::Parser;

use schelling::core::config::SimConfig;
use schelling::core::error::Result;
use schelling::simulation::Simulation;

#[derive(Parser, Debug)]
#[command(name = "schelling")]
#[command(about = "Run a two-color Schelling segregation simulation")]
struct Args {
    /// Side length of the square grid
    #[arg(long, default_value_t = 30)]
    size: usize,

    /// Chebyshev radius of the neighborhood residents consider
    #[arg(long, default_value_t = 1)]
    radius: usize,

    /// Fraction of cells left vacant
    #[arg(long, default_value_t = 0.2)]
    vacant: f64,

    /// Fraction of residents that are red
    #[arg(long, default_value_t = 0.5)]
    red: f64,

    /// Minimum same-color neighbor fraction for happiness
    #[arg(long, default_value_t = 0.3)]
    threshold: f64,

    /// Maximum number of time steps
    #[arg(long, default_value_t = 100)]
    steps: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Load the configuration from a TOML file instead of flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Print the final grid
    #[arg(long)]
    show_grid: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("schelling=info")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig {
            size: args.size,
            neighborhood_radius: args.radius,
            vacant_fraction: args.vacant,
            red_fraction: args.red,
            happiness_threshold: args.threshold,
            seed: args.seed.unwrap_or_else(rand::random),
        },
    };

    let mut sim = Simulation::new(&config)?;
    let report = sim.simulate(args.steps);

    if args.format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        println!("outcome: {:?}", report.outcome);
        println!("steps: {}", report.steps);
        println!("happiness: {:.1}%", report.final_happiness * 100.0);
        println!("elapsed: {} ms", report.duration_ms);
    }

    if args.show_grid {
        print!("{}", sim.grid());
    }

    Ok(())
}
