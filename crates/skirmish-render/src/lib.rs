//! ASCII rendering for Skirmish runs.
//!
//! Two views, each built as a plain `String` so they can be asserted on
//! directly, plus the [`TickObserver`](skirmish_engine::TickObserver)
//! implementations that print them:
//!
//! - [`render_roster`]: one status line per actor, the default per-tick
//!   view.
//! - [`render_grid`]: a bordered grid with heroes as letters, living
//!   monsters as their ids, and planned hero paths as dots.
//!
//! Renderers consume a read-only view of the world and never block; the
//! supervisor invokes them under the world lock between the two barriers
//! of each tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod grid;
mod observe;
mod roster;

pub use grid::render_grid;
pub use observe::{outcome_banner, LiveGridObserver, RosterObserver, ANSI_CLEAR};
pub use roster::render_roster;
