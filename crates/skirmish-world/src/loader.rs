//! Textual world-definition loader.
//!
//! Parses the line-oriented `KEY value` format into a fully validated
//! [`WorldState`]. The loader is the only validator in the workspace: once
//! it returns `Ok`, the engine assumes every invariant (non-negative stats,
//! in-bounds positions and waypoints) holds and re-checks nothing.
//!
//! Directives:
//!
//! ```text
//! GRID_SIZE 20 15
//! HERO_COUNT 2
//! HERO_HP 100                  # hero 1 shorthand
//! HERO_2_ATTACK_DAMAGE 12     # 1-based indexed form
//! HERO_2_PATH (1,2) (5,2)
//! MONSTER_COUNT 3
//! MONSTER_1_COORDS 7 4
//! MONSTER_1_VISION_RANGE 6
//! ```
//!
//! Blank lines and `#` comments are skipped. Indexed `HERO_<i>_*` lines
//! with an out-of-range index are silently ignored, while out-of-range
//! `MONSTER_<i>_*` lines are a hard error, an intentional asymmetry of
//! the format that callers rely on, preserved as-is.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path as FsPath, PathBuf};

use indexmap::IndexMap;

use skirmish_core::{Actor, Grid, Hero, Monster, MonsterId, Path, Point};

use crate::WorldState;

/// Waypoints beyond this are silently dropped at parse time.
const MAX_PATH_POINTS: usize = 4096;

/// Largest accepted `HERO_COUNT` / `MONSTER_COUNT`.
const MAX_ACTOR_COUNT: i64 = 10_000;

// ── LoadError ────────────────────────────────────────────────────

/// Errors from world-definition loading and validation.
#[derive(Debug)]
pub enum LoadError {
    /// The definition file could not be read.
    Io {
        /// The path that failed to open or read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// Grid dimensions below the 1x1 minimum.
    InvalidGrid {
        /// Parsed width.
        width: i32,
        /// Parsed height.
        height: i32,
    },
    /// `HERO_COUNT` missing a valid integer in `1..=10000`.
    InvalidHeroCount,
    /// `MONSTER_COUNT` missing a valid integer in `0..=10000`.
    InvalidMonsterCount,
    /// An indexed `MONSTER_<i>_*` directive referenced a slot outside
    /// the declared count.
    MonsterIndexOutOfRange {
        /// The 1-based index on the offending line.
        index: usize,
        /// The declared monster count at that point.
        count: usize,
    },
    /// A hero has a negative hp, attack, or attack range.
    NegativeHeroField {
        /// 1-based hero index.
        hero: usize,
    },
    /// A hero's start position lies outside the grid.
    HeroStartOutOfBounds {
        /// 1-based hero index.
        hero: usize,
    },
    /// A hero path waypoint lies outside the grid.
    HeroWaypointOutOfBounds {
        /// 1-based hero index.
        hero: usize,
        /// 0-based waypoint index within the path.
        waypoint: usize,
    },
    /// A monster has a negative hp, attack, attack range, or vision.
    NegativeMonsterField {
        /// 1-based monster index.
        monster: usize,
    },
    /// A monster's position lies outside the grid.
    MonsterOutOfBounds {
        /// 1-based monster index.
        monster: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::InvalidGrid { width, height } => {
                write!(f, "grid size must be at least 1x1, got {width}x{height}")
            }
            Self::InvalidHeroCount => {
                write!(f, "HERO_COUNT must be an integer in 1..=10000")
            }
            Self::InvalidMonsterCount => {
                write!(f, "MONSTER_COUNT must be an integer in 0..=10000")
            }
            Self::MonsterIndexOutOfRange { index, count } => {
                write!(f, "monster index {index} out of range (MONSTER_COUNT is {count})")
            }
            Self::NegativeHeroField { hero } => {
                write!(f, "hero {hero} has a negative stat")
            }
            Self::HeroStartOutOfBounds { hero } => {
                write!(f, "hero {hero} start position is outside the grid")
            }
            Self::HeroWaypointOutOfBounds { hero, waypoint } => {
                write!(f, "hero {hero} waypoint {waypoint} is outside the grid")
            }
            Self::NegativeMonsterField { monster } => {
                write!(f, "monster {monster} has a negative stat")
            }
            Self::MonsterOutOfBounds { monster } => {
                write!(f, "monster {monster} position is outside the grid")
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── Staging ──────────────────────────────────────────────────────

/// Per-monster overrides staged in declaration order; defaults fill the
/// gaps once the whole file is parsed.
#[derive(Clone, Debug, Default)]
struct MonsterOverride {
    hp: Option<i32>,
    attack: Option<i32>,
    vision: Option<i32>,
    attack_range: Option<i32>,
    pos: Option<Point>,
}

fn default_hero() -> Hero {
    Hero::new(Actor::new(Point::new(0, 0), 100, 10, 1), Path::new())
}

// ── Entry points ─────────────────────────────────────────────────

/// Load and validate a world definition from a file.
pub fn load_world_path(path: &FsPath) -> Result<WorldState, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_world_str(&text)
}

/// Load and validate a world definition from text.
pub fn load_world_str(input: &str) -> Result<WorldState, LoadError> {
    let mut grid = Grid::new(20, 15);
    let mut heroes = vec![default_hero()];
    let mut monster_count: usize = 0;
    let mut overrides: IndexMap<usize, MonsterOverride> = IndexMap::new();

    for raw in input.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, rest) = split_key(line);
        match key {
            "GRID_SIZE" => {
                if let Some((w, h)) = parse_two_ints(rest) {
                    grid = Grid::new(w, h);
                }
            }
            "HERO_COUNT" => {
                let n = parse_int(rest)
                    .filter(|n| (1..=MAX_ACTOR_COUNT).contains(n))
                    .ok_or(LoadError::InvalidHeroCount)?;
                heroes.resize_with(n as usize, default_hero);
            }
            "HERO_HP" => {
                if let Some(v) = parse_int32(rest) {
                    heroes[0].actor.hp = v;
                }
            }
            "HERO_ATTACK_DAMAGE" => {
                if let Some(v) = parse_int32(rest) {
                    heroes[0].actor.attack = v;
                }
            }
            "HERO_ATTACK_RANGE" => {
                if let Some(v) = parse_int32(rest) {
                    heroes[0].actor.attack_range = v;
                }
            }
            "HERO_START" => {
                if let Some((x, y)) = parse_two_ints(rest) {
                    heroes[0].actor.pos = Point::new(x, y);
                }
            }
            "HERO_PATH" => {
                heroes[0].path = parse_path(rest);
            }
            "MONSTER_COUNT" => {
                let n = parse_int(rest)
                    .filter(|n| (0..=MAX_ACTOR_COUNT).contains(n))
                    .ok_or(LoadError::InvalidMonsterCount)?;
                monster_count = n as usize;
                // A later count restarts the staging; earlier overrides
                // are discarded with it.
                overrides.clear();
            }
            _ => {
                if let Some((index, field)) = parse_indexed(key, "HERO_") {
                    // Out-of-range hero indices are silently ignored.
                    if (1..=heroes.len()).contains(&index) {
                        apply_hero_field(&mut heroes[index - 1], field, rest);
                    }
                } else if let Some((index, field)) = parse_indexed(key, "MONSTER_") {
                    if index < 1 || index > monster_count {
                        return Err(LoadError::MonsterIndexOutOfRange {
                            index,
                            count: monster_count,
                        });
                    }
                    apply_monster_field(overrides.entry(index).or_default(), field, rest);
                }
                // Anything else: unknown directive, ignored.
            }
        }
    }

    let monsters: Vec<Monster> = (1..=monster_count)
        .map(|i| {
            let o = overrides.get(&i).cloned().unwrap_or_default();
            Monster::new(
                MonsterId(i as u32),
                Actor::new(
                    o.pos.unwrap_or(Point::new(0, 0)),
                    o.hp.unwrap_or(50),
                    o.attack.unwrap_or(10),
                    o.attack_range.unwrap_or(1),
                ),
                o.vision.unwrap_or(5),
            )
        })
        .collect();

    validate(&grid, &heroes, &monsters)?;
    Ok(WorldState::new(grid, heroes, monsters))
}

// ── Post-parse validation ────────────────────────────────────────

fn validate(grid: &Grid, heroes: &[Hero], monsters: &[Monster]) -> Result<(), LoadError> {
    if grid.width < 1 || grid.height < 1 {
        return Err(LoadError::InvalidGrid {
            width: grid.width,
            height: grid.height,
        });
    }
    for (i, hero) in heroes.iter().enumerate() {
        let a = &hero.actor;
        if a.hp < 0 || a.attack < 0 || a.attack_range < 0 {
            return Err(LoadError::NegativeHeroField { hero: i + 1 });
        }
        if !grid.contains(a.pos) {
            return Err(LoadError::HeroStartOutOfBounds { hero: i + 1 });
        }
        for (w, &wp) in hero.path.iter().enumerate() {
            if !grid.contains(wp) {
                return Err(LoadError::HeroWaypointOutOfBounds {
                    hero: i + 1,
                    waypoint: w,
                });
            }
        }
    }
    for (i, monster) in monsters.iter().enumerate() {
        let a = &monster.actor;
        if a.hp < 0 || a.attack < 0 || a.attack_range < 0 || monster.vision < 0 {
            return Err(LoadError::NegativeMonsterField { monster: i + 1 });
        }
        if !grid.contains(a.pos) {
            return Err(LoadError::MonsterOutOfBounds { monster: i + 1 });
        }
    }
    Ok(())
}

// ── Line-level parsing helpers ───────────────────────────────────

/// Split a trimmed line into its directive key and the remainder.
fn split_key(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(at) => (&line[..at], line[at..].trim_start()),
        None => (line, ""),
    }
}

/// First whitespace-separated token as an integer, if any.
fn parse_int(rest: &str) -> Option<i64> {
    rest.split_whitespace().next()?.parse().ok()
}

fn parse_int32(rest: &str) -> Option<i32> {
    rest.split_whitespace().next()?.parse().ok()
}

/// First two whitespace-separated tokens as integers, if both parse.
fn parse_two_ints(rest: &str) -> Option<(i32, i32)> {
    let mut it = rest.split_whitespace();
    let a = it.next()?.parse().ok()?;
    let b = it.next()?.parse().ok()?;
    Some((a, b))
}

/// Split `PREFIX<digits>_<FIELD>` into the 1-based index and field name.
fn parse_indexed<'a>(key: &'a str, prefix: &str) -> Option<(usize, &'a str)> {
    let tail = key.strip_prefix(prefix)?;
    let underscore = tail.find('_')?;
    let index: usize = tail[..underscore].parse().ok()?;
    Some((index, &tail[underscore + 1..]))
}

fn apply_hero_field(hero: &mut Hero, field: &str, rest: &str) {
    match field {
        "HP" => {
            if let Some(v) = parse_int32(rest) {
                hero.actor.hp = v;
            }
        }
        "ATTACK_DAMAGE" => {
            if let Some(v) = parse_int32(rest) {
                hero.actor.attack = v;
            }
        }
        "ATTACK_RANGE" => {
            if let Some(v) = parse_int32(rest) {
                hero.actor.attack_range = v;
            }
        }
        "START" => {
            if let Some((x, y)) = parse_two_ints(rest) {
                hero.actor.pos = Point::new(x, y);
            }
        }
        "PATH" => {
            hero.path = parse_path(rest);
        }
        _ => {}
    }
}

fn apply_monster_field(staged: &mut MonsterOverride, field: &str, rest: &str) {
    match field {
        "HP" => staged.hp = parse_int32(rest).or(staged.hp),
        "ATTACK_DAMAGE" => staged.attack = parse_int32(rest).or(staged.attack),
        "VISION_RANGE" => staged.vision = parse_int32(rest).or(staged.vision),
        "ATTACK_RANGE" => staged.attack_range = parse_int32(rest).or(staged.attack_range),
        "COORDS" => {
            if let Some((x, y)) = parse_two_ints(rest) {
                staged.pos = Some(Point::new(x, y));
            }
        }
        _ => {}
    }
}

/// Parse a sequence of `(x, y)` waypoint groups.
///
/// Tolerant of interior whitespace; stops at the first malformed group.
/// At most [`MAX_PATH_POINTS`] waypoints are kept.
fn parse_path(src: &str) -> Path {
    let mut path = Path::new();
    let mut rest = src;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(')') else { break };
        let body = &after[..close];
        let mut parts = body.split(',');
        let (Some(xs), Some(ys), None) = (parts.next(), parts.next(), parts.next()) else {
            break;
        };
        let (Ok(x), Ok(y)) = (xs.trim().parse::<i32>(), ys.trim().parse::<i32>()) else {
            break;
        };
        if path.len() < MAX_PATH_POINTS {
            path.push(Point::new(x, y));
        }
        rest = &after[close + 1..];
    }
    path
}
