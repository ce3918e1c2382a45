//! Per-tick observation interface driven by the supervisor.

use skirmish_core::TickId;
use skirmish_world::{Outcome, WorldState};

/// Read-only view of the run, invoked by the supervisor under the world
/// lock once per tick and once at termination.
///
/// Implementations must not mutate the world (the `&WorldState` borrow
/// enforces this) and must not block the tick indefinitely.
pub trait TickObserver {
    /// Called after every actor has completed its action for `tick`.
    fn on_tick(&mut self, world: &WorldState, tick: TickId) {
        let _ = (world, tick);
    }

    /// Called once, in the tick that concludes the run, after
    /// [`on_tick`](TickObserver::on_tick) for the same tick.
    fn on_outcome(&mut self, world: &WorldState, tick: TickId, outcome: Outcome) {
        let _ = (world, tick, outcome);
    }
}

/// An observer that ignores everything. Used for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl TickObserver for NullObserver {}
