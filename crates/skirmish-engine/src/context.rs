//! The shared run context: world lock, barrier pair, and termination flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use skirmish_world::WorldState;

use crate::barrier::ReusableBarrier;

/// Everything the workers and the supervisor share for one run.
///
/// Constructed before any worker spawns, passed by `Arc` into every
/// worker, and discarded after all workers join; no ambient global
/// state. The termination flag is written at most once per run, by the
/// supervisor, between the two barriers of the concluding tick; workers
/// read it only after barrier B, so the Release store is always visible
/// to their Acquire loads.
pub(crate) struct RunContext {
    world: Mutex<WorldState>,
    /// Crossed by every party after its tick-T action.
    pub(crate) barrier_a: ReusableBarrier,
    /// Crossed by every party after the supervisor's tick-T evaluation.
    pub(crate) barrier_b: ReusableBarrier,
    over: AtomicBool,
    step_delay: Duration,
}

impl RunContext {
    pub(crate) fn new(world: WorldState, parties: usize, step_delay: Duration) -> Self {
        Self {
            world: Mutex::new(world),
            barrier_a: ReusableBarrier::new(parties),
            barrier_b: ReusableBarrier::new(parties),
            over: AtomicBool::new(false),
            step_delay,
        }
    }

    /// Take the single world lock for one bounded critical section.
    /// Never held across a barrier wait.
    pub(crate) fn world(&self) -> MutexGuard<'_, WorldState> {
        self.world.lock().unwrap()
    }

    /// Cosmetic pacing sleep between a worker's action and barrier A.
    pub(crate) fn pace(&self) {
        if !self.step_delay.is_zero() {
            thread::sleep(self.step_delay);
        }
    }

    /// Set the termination flag. Called exactly once per run.
    pub(crate) fn mark_over(&self) {
        self.over.store(true, Ordering::Release);
    }

    /// Read the termination flag; valid for tick T only after crossing
    /// barrier B of tick T.
    pub(crate) fn is_over(&self) -> bool {
        self.over.load(Ordering::Acquire)
    }

    /// Recover the world after every worker has joined.
    pub(crate) fn into_world(self) -> WorldState {
        self.world.into_inner().unwrap()
    }
}
