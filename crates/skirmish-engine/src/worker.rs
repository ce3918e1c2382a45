//! Actor worker loops: one thread per hero and per monster.

use std::sync::Arc;

use crate::context::RunContext;

/// Worker loop for one hero registry slot.
pub(crate) struct HeroWorker {
    ctx: Arc<RunContext>,
    index: usize,
}

impl HeroWorker {
    pub(crate) fn new(ctx: Arc<RunContext>, index: usize) -> Self {
        Self { ctx, index }
    }

    /// Run until the supervisor raises the termination flag.
    ///
    /// The decision runs in a single bounded critical section; the lock
    /// is released before the pacing sleep and both barrier waits. A
    /// dead hero keeps participating in the barriers (the party count
    /// is fixed for the whole run); its decision step just does nothing.
    pub(crate) fn run(self) {
        loop {
            self.ctx.world().hero_act(self.index);
            self.ctx.pace();
            // Phase A: this tick's actions are complete.
            self.ctx.barrier_a.wait();
            // Phase B: the supervisor has evaluated termination and,
            // if the run is over, set the flag between the barriers.
            self.ctx.barrier_b.wait();
            if self.ctx.is_over() {
                break;
            }
        }
    }
}

/// Worker loop for one monster registry slot.
pub(crate) struct MonsterWorker {
    ctx: Arc<RunContext>,
    index: usize,
}

impl MonsterWorker {
    pub(crate) fn new(ctx: Arc<RunContext>, index: usize) -> Self {
        Self { ctx, index }
    }

    /// Run until the supervisor raises the termination flag.
    pub(crate) fn run(self) {
        loop {
            self.ctx.world().monster_act(self.index);
            self.ctx.pace();
            self.ctx.barrier_a.wait();
            self.ctx.barrier_b.wait();
            if self.ctx.is_over() {
                break;
            }
        }
    }
}
