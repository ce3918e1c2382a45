//! World state and per-tick decision steps for the Skirmish simulation.
//!
//! [`WorldState`] owns the grid bounds and the hero/monster registries and
//! exposes the decision step each actor worker runs once per tick
//! ([`WorldState::hero_act`], [`WorldState::monster_act`]) plus the
//! termination evaluation the supervisor runs after every tick
//! ([`WorldState::evaluate_outcome`]).
//!
//! All methods here assume they are called under the single world lock the
//! engine wraps the state in; the state itself carries no synchronization.
//! The [`loader`] module builds a fully validated `WorldState` from the
//! textual world-definition format.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod loader;
mod state;

pub use loader::{load_world_path, load_world_str, LoadError};
pub use state::{Outcome, WorldState};
