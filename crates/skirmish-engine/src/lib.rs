//! Tick-lockstep engine for the Skirmish simulation.
//!
//! Spawns one long-lived worker thread per actor plus a supervisor on the
//! calling thread, and lock-steps them all through discrete ticks with a
//! pair of reusable barriers and a single world lock:
//!
//! ```text
//! Worker (x H+M)                    Supervisor (caller's thread)
//!     |                                 |
//!     | lock -> decide -> unlock        |
//!     | [cosmetic pace delay]           |
//!     |---- barrier A ------------------|  no partially-updated tick
//!     |                                 | lock -> observe -> evaluate
//!     |                                 |   -> set flag on terminate
//!     |                                 | unlock
//!     |---- barrier B ------------------|  flag write before any read
//!     | read flag -> next tick or exit  | read flag -> next tick or exit
//! ```
//!
//! Barrier A guarantees every actor's tick-T mutation happens-before the
//! supervisor's tick-T evaluation; barrier B guarantees the supervisor's
//! flag write happens-before every worker's read of it. No worker begins
//! tick T+1 before every party has crossed barrier B of tick T, so ticks
//! never overlap.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod barrier;
pub mod config;
mod context;
pub mod observer;
mod run;
mod supervisor;
mod worker;

pub use barrier::ReusableBarrier;
pub use config::{EngineError, RenderMode, RunConfig};
pub use observer::{NullObserver, TickObserver};
pub use run::{RunReport, Simulation};
