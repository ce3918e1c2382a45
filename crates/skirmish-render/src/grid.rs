//! Bordered ASCII grid view.

use std::fmt::Write;

use skirmish_core::{step_toward, TickId};
use skirmish_world::WorldState;

/// Render the grid view.
///
/// The drawing area covers the full inclusive coordinate range
/// (`width + 1` columns by `height + 1` rows) with y growing upward, so
/// the top printed row is `y = height`. Planned hero paths are walked
/// with the same x-first staircase the movement rule uses and drawn as
/// `.` on empty cells; living monsters draw their id digit (`M` from id
/// 10 up), heroes draw `A..Z` by registry slot (`H` from slot 26 up) and
/// overwrite anything beneath them.
pub fn render_grid(world: &WorldState, tick: TickId, title: Option<&str>) -> String {
    let cols = (world.grid.width + 1) as usize;
    let rows = (world.grid.height + 1) as usize;
    let mut cells = vec![vec![b' '; cols]; rows];

    // Planned paths first, so actors overwrite them.
    for hero in &world.heroes {
        if hero.path.is_empty() {
            continue;
        }
        let mut walker = hero.actor.pos;
        mark_path_cell(&mut cells, world, walker);
        for &waypoint in &hero.path {
            while walker != waypoint {
                walker = step_toward(walker, waypoint);
                mark_path_cell(&mut cells, world, walker);
            }
        }
    }

    for monster in &world.monsters {
        if !monster.actor.alive {
            continue;
        }
        let glyph = if monster.id.0 < 10 {
            b'0' + monster.id.0 as u8
        } else {
            b'M'
        };
        cells[monster.actor.pos.y as usize][monster.actor.pos.x as usize] = glyph;
    }

    for (h, hero) in world.heroes.iter().enumerate() {
        if !hero.actor.alive {
            continue;
        }
        let glyph = if h < 26 { b'A' + h as u8 } else { b'H' };
        cells[hero.actor.pos.y as usize][hero.actor.pos.x as usize] = glyph;
    }

    let mut out = String::new();
    if let Some(title) = title {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(
        out,
        "Grid {}x{}   Tick {tick}",
        world.grid.width, world.grid.height
    );

    let border: String = "-".repeat(cols);
    let _ = writeln!(out, "   +{border}+");
    for y in (0..rows).rev() {
        let row: String = cells[y].iter().map(|&c| c as char).collect();
        let _ = writeln!(out, "{y:3}|{row}|");
    }
    let _ = writeln!(out, "   +{border}+");

    // Two-row x axis: tens digits at multiples of 10, then units.
    out.push_str("    ");
    for x in 0..cols {
        if x % 10 == 0 {
            out.push((b'0' + ((x / 10) % 10) as u8) as char);
        } else {
            out.push(' ');
        }
    }
    out.push_str("\n    ");
    for x in 0..cols {
        out.push((b'0' + (x % 10) as u8) as char);
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "Legend: A..Z=heroes, 1..9=monsters (id), '.'=planned hero path"
    );
    for (h, hero) in world.heroes.iter().enumerate() {
        let _ = write!(
            out,
            "HERO{:02} HP={} at {}",
            h + 1,
            hero.actor.hp,
            hero.actor.pos
        );
        if hero.engaged {
            out.push_str(" [FIGHTING]");
        }
        out.push('\n');
    }
    for monster in &world.monsters {
        let _ = write!(
            out,
            "M{:02} at {} HP={} {}",
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

/// Dot a path cell, leaving occupied cells alone.
fn mark_path_cell(cells: &mut [Vec<u8>], world: &WorldState, p: skirmish_core::Point) {
    if world.grid.contains(p) {
        let cell = &mut cells[p.y as usize][p.x as usize];
        if *cell == b' ' {
            *cell = b'.';
        }
    }
}
