//! Run lifecycle: spawn the workers, supervise, join, report.

use std::sync::Arc;
use std::thread;

use skirmish_core::TickId;
use skirmish_world::{Outcome, WorldState};

use crate::config::{EngineError, RunConfig};
use crate::context::RunContext;
use crate::observer::TickObserver;
use crate::supervisor::TickSupervisor;
use crate::worker::{HeroWorker, MonsterWorker};

/// Result of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Which termination condition fired.
    pub outcome: Outcome,
    /// The 0-based tick the run concluded on.
    pub ticks: TickId,
    /// The final world state, recovered after every worker joined.
    pub world: WorldState,
}

/// A configured simulation, ready to run.
///
/// Consumes a fully validated [`WorldState`] (the engine performs no
/// validation of its own) and runs the `1 + H + M` party protocol to
/// completion on [`run()`](Simulation::run).
pub struct Simulation {
    world: WorldState,
    config: RunConfig,
}

impl Simulation {
    /// Wrap a validated world and a run configuration.
    pub fn new(world: WorldState, config: RunConfig) -> Self {
        Self { world, config }
    }

    /// Run to termination, driving `observer` once per tick.
    ///
    /// Spawns one named thread per hero (`hero-1`, `hero-2`, ...) and per
    /// monster (`monster-1`, ...); the supervisor runs on the calling
    /// thread. All workers are joined before the report is assembled, so
    /// the returned world is the exact final state.
    ///
    /// # Errors
    ///
    /// [`EngineError::WorkerSpawn`] if a worker thread could not be
    /// started. Workers spawned before the failure are parked at the
    /// first barrier (the full party count can no longer be reached) and
    /// are torn down with the process, mirroring a failed startup abort.
    pub fn run(self, observer: &mut dyn TickObserver) -> Result<RunReport, EngineError> {
        let hero_count = self.world.heroes.len();
        let monster_count = self.world.monsters.len();
        let parties = 1 + hero_count + monster_count;

        let ctx = Arc::new(RunContext::new(self.world, parties, self.config.step_delay));

        let mut handles = Vec::with_capacity(hero_count + monster_count);
        for index in 0..hero_count {
            let worker = HeroWorker::new(Arc::clone(&ctx), index);
            let handle = thread::Builder::new()
                .name(format!("hero-{}", index + 1))
                .spawn(move || worker.run())
                .map_err(|e| EngineError::WorkerSpawn {
                    role: "hero",
                    index: index + 1,
                    reason: e.to_string(),
                })?;
            handles.push(handle);
        }
        for index in 0..monster_count {
            let worker = MonsterWorker::new(Arc::clone(&ctx), index);
            let handle = thread::Builder::new()
                .name(format!("monster-{}", index + 1))
                .spawn(move || worker.run())
                .map_err(|e| EngineError::WorkerSpawn {
                    role: "monster",
                    index: index + 1,
                    reason: e.to_string(),
                })?;
            handles.push(handle);
        }

        let (outcome, ticks) = TickSupervisor::new(&ctx, observer).run();

        for handle in handles {
            // Worker loops return nothing; join only for completion.
            let _ = handle.join();
        }

        let world = Arc::try_unwrap(ctx)
            .map_err(|_| EngineError::ContextRecovery)?
            .into_world();

        Ok(RunReport {
            outcome,
            ticks,
            world,
        })
    }
}
