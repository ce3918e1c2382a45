//! The tick supervisor: termination evaluation and flag ownership.

use skirmish_core::TickId;
use skirmish_world::Outcome;

use crate::context::RunContext;
use crate::observer::TickObserver;

/// Supervisor lifecycle. `Terminated` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SupervisorState {
    Running,
    Terminated,
}

/// Drives the two-barrier protocol from the evaluation side.
///
/// The supervisor is one of the barrier parties: it waits on barrier A so
/// it never observes a partially-updated tick, evaluates termination under
/// the world lock, owns the single write of the termination flag, and
/// waits on barrier B to release everyone into the next tick or shutdown.
pub(crate) struct TickSupervisor<'r> {
    ctx: &'r RunContext,
    observer: &'r mut dyn TickObserver,
    state: SupervisorState,
}

impl<'r> TickSupervisor<'r> {
    pub(crate) fn new(ctx: &'r RunContext, observer: &'r mut dyn TickObserver) -> Self {
        Self {
            ctx,
            observer,
            state: SupervisorState::Running,
        }
    }

    /// Run the supervisor loop to termination.
    ///
    /// Returns the outcome and the tick it fired on. Ticks are 0-based:
    /// the first evaluated tick is `TickId(0)`.
    pub(crate) fn run(mut self) -> (Outcome, TickId) {
        let mut tick = TickId(0);
        loop {
            // Phase A: every actor has finished this tick's action.
            self.ctx.barrier_a.wait();

            let outcome = {
                let world = self.ctx.world();
                self.observer.on_tick(&world, tick);
                let outcome = world.evaluate_outcome();
                if let Some(outcome) = outcome {
                    self.observer.on_outcome(&world, tick, outcome);
                    // The flag write happens under the lock, before
                    // barrier B, so every worker's post-B read sees it.
                    self.ctx.mark_over();
                    self.state = SupervisorState::Terminated;
                }
                outcome
            };

            // Phase B: release the workers into tick T+1 or shutdown.
            self.ctx.barrier_b.wait();

            if let Some(outcome) = outcome {
                debug_assert_eq!(self.state, SupervisorState::Terminated);
                return (outcome, tick);
            }
            tick.0 += 1;
        }
    }
}
