//! The shared actor data model: combat stats, heroes, and monsters.

use smallvec::SmallVec;

use crate::geom::Point;
use crate::id::MonsterId;

/// A hero's planned route, as ordered waypoints.
///
/// Short demo paths stay inline; long parsed paths spill to the heap
/// transparently.
pub type Path = SmallVec<[Point; 8]>;

/// Combat state shared by heroes and monsters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    /// Current grid position. Stays within the grid's inclusive bounds
    /// for the actor's entire life (established by the loader, preserved
    /// by the movement step).
    pub pos: Point,
    /// Hit points, never negative.
    pub hp: i32,
    /// Damage dealt per successful combat step.
    pub attack: i32,
    /// Manhattan distance at or under which this actor can strike.
    pub attack_range: i32,
    /// Liveness. Flips true -> false exactly once, when `hp` is clamped
    /// to 0; never reverts.
    pub alive: bool,
}

impl Actor {
    /// Construct a living actor.
    pub fn new(pos: Point, hp: i32, attack: i32, attack_range: i32) -> Self {
        Self {
            pos,
            hp,
            attack,
            attack_range,
            alive: true,
        }
    }

    /// Apply `amount` damage: subtract, clamp `hp` at 0, and mark the
    /// actor dead when the clamp lands on 0.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            self.alive = false;
        }
    }
}

/// A hero: an actor following a waypoint path, fighting what it meets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hero {
    /// Shared combat state.
    pub actor: Actor,
    /// Ordered waypoints to visit.
    pub path: Path,
    /// Index of the next unvisited waypoint. Starts at 0 and only grows.
    pub path_index: usize,
    /// True only during a tick in which the hero is in combat; combat
    /// suppresses movement.
    pub engaged: bool,
}

impl Hero {
    /// Construct a hero at the start of its path.
    pub fn new(actor: Actor, path: Path) -> Self {
        Self {
            actor,
            path,
            path_index: 0,
            engaged: false,
        }
    }

    /// Whether every waypoint has been reached.
    pub fn path_complete(&self) -> bool {
        self.path_index >= self.path.len()
    }
}

/// A monster: an actor that chases the nearest hero once alerted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    /// Stable 1-based display id.
    pub id: MonsterId,
    /// Shared combat state.
    pub actor: Actor,
    /// Manhattan perception radius.
    pub vision: i32,
    /// Whether a hero has been perceived, directly or via a pack alert.
    /// Monotonic: false -> true only.
    pub alerted: bool,
}

impl Monster {
    /// Construct an unalerted monster.
    pub fn new(id: MonsterId, actor: Actor, vision: i32) -> Self {
        Self {
            id,
            actor,
            vision,
            alerted: false,
        }
    }
}
