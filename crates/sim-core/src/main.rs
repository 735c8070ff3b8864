//! Misinformation Diffusion Simulator
//!
//! Builds the model from a TOML config plus command-line overrides, runs it
//! to saturation or the tick budget, and writes metrics and snapshots for
//! external plotting tools.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use sim_core::output::{write_metrics, write_snapshot};
use sim_core::{BuildError, Simulation, SimulationConfig};

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "misinfo_sim")]
#[command(about = "Agent-based misinformation diffusion over a contact network")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Tick budget when the run does not saturate
    #[arg(long)]
    ticks: Option<u64>,

    /// Seeding strategy (random, staff, high_betweenness, high_degree,
    /// peripheral_betweenness, peripheral_degree)
    #[arg(long)]
    seed_mode: Option<String>,

    /// Network topology (uniform_weight, random_weight, small_world)
    #[arg(long)]
    topology: Option<String>,

    /// Output directory for metrics and snapshots
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Also write initial and final graph snapshots
    #[arg(long)]
    snapshots: bool,
}

fn build_config(args: &Args) -> Result<SimulationConfig, BuildError> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.max_ticks = ticks;
    }
    if let Some(mode) = &args.seed_mode {
        config.apply_param("seed_mode", mode)?;
    }
    if let Some(topology) = &args.topology {
        config.apply_param("topology", topology)?;
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = build_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });

    println!("Misinformation Diffusion Simulator");
    println!("==================================");
    println!("Seed: {}", config.seed);
    println!("Nodes: {} ({} staff)", config.total_nodes(), config.staff_count());
    println!("Topology: {}", config.topology.as_str());
    println!("Seed mode: {}", config.seed_mode.as_str());
    println!("Tick budget: {}", config.max_ticks);
    println!();

    let max_ticks = config.max_ticks;
    let mut sim = Simulation::new(config).unwrap_or_else(|e| {
        eprintln!("Setup error: {}", e);
        process::exit(1);
    });

    if args.snapshots {
        let initial = sim.snapshot();
        if let Err(e) = write_snapshot(&initial, args.output_dir.join("initial_network.json")) {
            eprintln!("Warning: could not write initial snapshot: {}", e);
        }
    }

    println!("Starting simulation...");
    while sim.running() && sim.current_tick() < max_ticks {
        sim.step();

        if sim.current_tick() % 100 == 0 {
            if let Some(record) = sim.metrics().last() {
                println!(
                    "[Tick {:>5}] trust: {:.2}  distrust: {:.2}  belief sum: {:+.2}",
                    record.tick, record.trust, record.distrust, record.belief_total
                );
            }
        }
    }

    let summary = sim.summary();
    println!();
    if summary.saturated {
        println!(
            "Population saturated after {} ticks (belief sum {:+.2}).",
            summary.ticks, summary.final_record.belief_total
        );
    } else {
        println!("Tick budget exhausted after {} ticks.", summary.ticks);
    }

    if let Err(e) = write_metrics(sim.metrics(), args.output_dir.join("metrics.json")) {
        eprintln!("Warning: could not write metrics: {}", e);
    } else {
        println!("Wrote {}", args.output_dir.join("metrics.json").display());
    }

    let summary_path = args.output_dir.join("summary.json");
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&summary_path, json) {
                eprintln!("Warning: could not write summary: {}", e);
            } else {
                println!("Wrote {}", summary_path.display());
            }
        }
        Err(e) => eprintln!("Warning: could not serialize summary: {}", e),
    }

    if args.snapshots {
        let final_snapshot = sim.snapshot();
        if let Err(e) = write_snapshot(&final_snapshot, args.output_dir.join("final_network.json"))
        {
            eprintln!("Warning: could not write final snapshot: {}", e);
        }
    }
}
