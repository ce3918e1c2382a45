//! Command-line runner: load a world definition, pick a view, run.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use skirmish_core::TickId;
use skirmish_engine::{RenderMode, RunConfig, Simulation, TickObserver};
use skirmish_render::{render_grid, LiveGridObserver, RosterObserver, ANSI_CLEAR};
use skirmish_world::load_world_path;

/// Tick-synchronized hero/monster skirmish simulator.
#[derive(Parser, Debug)]
#[command(name = "skirmish", version, about)]
struct Args {
    /// World definition file.
    config: PathBuf,

    /// Cosmetic per-actor delay in microseconds, for human-observable
    /// pacing.
    #[arg(long, default_value_t = 0)]
    tick_us: u64,

    /// Redraw the ASCII grid every tick instead of printing the roster.
    #[arg(long)]
    ascii: bool,

    /// Render the initial world once and exit without simulating.
    #[arg(long, conflicts_with = "ascii")]
    ascii_only: bool,
}

impl Args {
    fn render_mode(&self) -> RenderMode {
        if self.ascii_only {
            RenderMode::Once
        } else if self.ascii {
            RenderMode::Live
        } else {
            RenderMode::Roster
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let world = load_world_path(&args.config)
        .with_context(|| format!("loading world from {}", args.config.display()))?;

    println!(
        "Grid {}x{}, heroes={}, monsters={}",
        world.grid.width,
        world.grid.height,
        world.heroes.len(),
        world.monsters.len()
    );

    let render = args.render_mode();
    if render == RenderMode::Once {
        print!(
            "{ANSI_CLEAR}{}",
            render_grid(&world, TickId(0), Some("Initial scenario"))
        );
        return Ok(());
    }

    let config = RunConfig {
        step_delay: Duration::from_micros(args.tick_us),
        render,
    };

    let mut roster = RosterObserver;
    let mut live = LiveGridObserver;
    let observer: &mut dyn TickObserver = match render {
        RenderMode::Live => &mut live,
        _ => &mut roster,
    };

    let _report = Simulation::new(world, config)
        .run(observer)
        .context("running simulation")?;

    Ok(())
}
