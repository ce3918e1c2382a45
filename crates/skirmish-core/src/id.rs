//! Strongly-typed identifiers.

use std::fmt;

/// Monotonically increasing tick counter.
///
/// The first evaluated tick of a run is `TickId(0)`; the supervisor
/// advances the counter once per completed barrier cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Stable 1-based monster identifier, assigned at world load.
///
/// Used for display and for tie-break-free identification; never reused
/// within a run, and never reassigned when a monster dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonsterId(pub u32);

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MonsterId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_id_orders_and_displays() {
        assert!(TickId(1) < TickId(2));
        assert_eq!(TickId::from(7).to_string(), "7");
    }

    #[test]
    fn monster_id_is_stable_value() {
        let id = MonsterId(3);
        assert_eq!(id, MonsterId::from(3));
        assert_eq!(id.to_string(), "3");
    }
}
