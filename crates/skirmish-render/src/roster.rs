//! Per-tick textual roster of every actor.

use std::fmt::Write;

use skirmish_core::TickId;
use skirmish_world::WorldState;

/// Render the roster view: a tick header, one line per hero, one line
/// per monster. Heroes are numbered by registry slot; monsters print
/// their stable id.
pub fn render_roster(world: &WorldState, tick: TickId) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tick {tick}");
    for (h, hero) in world.heroes.iter().enumerate() {
        let _ = write!(
            out,
            " HERO{:02} {} HP={}",
            h + 1,
            hero.actor.pos,
            hero.actor.hp
        );
        if hero.engaged {
            out.push_str(" [FIGHTING]");
        }
        out.push('\n');
    }
    for monster in &world.monsters {
        let _ = write!(
            out,
            "  M{:02} {} HP={} {}",
            monster.id.0,
            monster.actor.pos,
            monster.actor.hp,
            if monster.actor.alive { "ALIVE" } else { "DEAD" }
        );
        if monster.actor.alive && monster.alerted {
            out.push_str(" ALERTED");
        }
        out.push('\n');
    }
    out
}
