mod simulation;

use anyhow::Result;
use clap::Parser;

use simulation::{FlowRates, SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "signal_sim")]
#[command(about = "Adaptive traffic-signal simulation for a four-way intersection")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of the grid in cells
    #[arg(long, default_value = "32")]
    grid_size: i32,

    /// Lanes per approach direction
    #[arg(long, default_value = "3")]
    lanes: i32,

    /// Eastbound flow rate (percent chance of a spawn per tick)
    #[arg(long, default_value = "30")]
    east: u8,

    /// Westbound flow rate
    #[arg(long, default_value = "30")]
    west: u8,

    /// Northbound flow rate
    #[arg(long, default_value = "20")]
    north: u8,

    /// Southbound flow rate
    #[arg(long, default_value = "20")]
    south: u8,

    /// Print a summary every N ticks (0 disables intermediate summaries)
    #[arg(long, default_value = "100")]
    summary_every: u64,

    /// Draw the ASCII map along with each summary
    #[arg(long)]
    map: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimConfig {
        grid_size: cli.grid_size,
        lanes_per_approach: cli.lanes,
        flows: FlowRates::new(cli.east, cli.west, cli.north, cli.south),
        seed: cli.seed,
    };

    println!("Running signal simulation for {} ticks...", cli.ticks);
    if let Some(seed) = cli.seed {
        println!("Seed: {}", seed);
    }
    println!();

    let mut world = SimWorld::new(config)?;

    for _ in 0..cli.ticks {
        world.tick();

        if cli.summary_every > 0 && world.tick_count % cli.summary_every == 0 {
            println!("--- After tick {} ---", world.tick_count);
            world.print_summary();
            if cli.map {
                world.draw_map();
            }
            println!();
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    if cli.map {
        world.draw_map();
    }

    Ok(())
}
