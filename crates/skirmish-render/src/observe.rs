//! Observer implementations that print the views, plus outcome banners.

use skirmish_core::TickId;
use skirmish_engine::TickObserver;
use skirmish_world::{Outcome, WorldState};

use crate::grid::render_grid;
use crate::roster::render_roster;

/// ANSI home-and-clear sequence used by the live grid view.
pub const ANSI_CLEAR: &str = "\x1b[H\x1b[J";

/// One-line summary of how the run ended.
pub fn outcome_banner(outcome: Outcome, tick: TickId) -> String {
    match outcome {
        Outcome::Defeat => {
            format!(">>> All heroes died at tick {tick}. GAME OVER.")
        }
        Outcome::PathsComplete { monsters_remain } => {
            let coda = if monsters_remain {
                "Monsters remain, but the heroes finished their paths."
            } else {
                "All monsters were eliminated."
            };
            format!(">>> All heroes reached their goals at tick {tick}. {coda}")
        }
        Outcome::Victory => {
            format!(">>> ALL MONSTERS DEAD at tick {tick}.")
        }
    }
}

/// Prints the roster view every tick and the banner at termination.
#[derive(Clone, Copy, Debug, Default)]
pub struct RosterObserver;

impl TickObserver for RosterObserver {
    fn on_tick(&mut self, world: &WorldState, tick: TickId) {
        print!("{}", render_roster(world, tick));
    }

    fn on_outcome(&mut self, _world: &WorldState, tick: TickId, outcome: Outcome) {
        println!("\n{}", outcome_banner(outcome, tick));
    }
}

/// Clears the terminal and redraws the grid view every tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiveGridObserver;

impl TickObserver for LiveGridObserver {
    fn on_tick(&mut self, world: &WorldState, tick: TickId) {
        print!(
            "{ANSI_CLEAR}{}",
            render_grid(world, tick, Some("Skirmish - ASCII view"))
        );
    }

    fn on_outcome(&mut self, _world: &WorldState, tick: TickId, outcome: Outcome) {
        println!("\n{}", outcome_banner(outcome, tick));
    }
}
