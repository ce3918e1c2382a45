//! Run configuration and engine error types.

use std::error::Error;
use std::fmt;
use std::time::Duration;

// ── RenderMode ───────────────────────────────────────────────────

/// What the composition boundary should show while the run progresses.
///
/// The engine itself is agnostic (it drives whatever observer it is
/// given), but the selector travels with the run configuration so one
/// value describes a whole invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Per-tick textual roster of every actor.
    #[default]
    Roster,
    /// ANSI-cleared ASCII grid redrawn every tick.
    Live,
    /// Render the initial world once and exit without simulating.
    Once,
    /// No per-tick output; the outcome is still reported via the run
    /// report.
    Off,
}

// ── RunConfig ────────────────────────────────────────────────────

/// Configuration for one simulation run.
#[derive(Clone, Debug, Default)]
pub struct RunConfig {
    /// Cosmetic pause each worker takes after its action, purely for
    /// human-observable pacing. Has no effect on correctness or
    /// ordering.
    pub step_delay: Duration,
    /// Render mode selector, consumed by the composition boundary.
    pub render: RenderMode,
}

// ── EngineError ──────────────────────────────────────────────────

/// Errors from starting or finishing a run.
///
/// There is no recoverable error path *during* a run: once the tick loop
/// begins, synchronization primitives are treated as infallible and the
/// run ends only through a termination condition.
#[derive(Debug)]
pub enum EngineError {
    /// An actor worker thread could not be spawned. The run is aborted;
    /// workers already parked at the first barrier are torn down with
    /// the process.
    WorkerSpawn {
        /// Which kind of worker failed (`"hero"` or `"monster"`).
        role: &'static str,
        /// 1-based index of the failed worker within its registry.
        index: usize,
        /// The underlying spawn failure.
        reason: String,
    },
    /// The world could not be recovered from the shared run context
    /// after every worker joined.
    ContextRecovery,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkerSpawn {
                role,
                index,
                reason,
            } => {
                write!(f, "failed to spawn {role} worker {index}: {reason}")
            }
            Self::ContextRecovery => {
                write!(f, "run context still shared after all workers joined")
            }
        }
    }
}

impl Error for EngineError {}
