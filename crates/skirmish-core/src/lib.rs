//! Core types for the Skirmish tick simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the grid geometry, the shared actor data model, and the strongly-typed
//! identifiers used throughout the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod actor;
pub mod geom;
pub mod id;

pub use actor::{Actor, Hero, Monster, Path};
pub use geom::{manhattan, step_toward, Grid, Point};
pub use id::{MonsterId, TickId};
