//! Cyclic rendezvous for a fixed party count, reusable across unbounded
//! cycles.

use std::sync::{Condvar, Mutex};

struct BarrierState {
    /// Countdown for the current cycle; resets to `parties` when it hits 0.
    count: usize,
    /// Cycle counter; advances once per completed rendezvous.
    generation: u64,
}

/// A generation-counted barrier.
///
/// Each [`wait()`](ReusableBarrier::wait) decrements a countdown; the last
/// arrival re-arms the countdown, advances the generation, and wakes every
/// waiter of the current generation. Earlier arrivals block until the
/// generation changes. The generation check, not a one-shot wake, is what
/// makes the barrier immune to spurious wake-ups.
///
/// Exactly `parties` distinct calls must occur per cycle. Fewer deadlocks
/// every party permanently; this is a caller contract, not something the
/// barrier detects.
pub struct ReusableBarrier {
    lock: Mutex<BarrierState>,
    cv: Condvar,
    parties: usize,
}

impl ReusableBarrier {
    /// Create a barrier for `parties` participants.
    ///
    /// # Panics
    ///
    /// Panics if `parties` is zero.
    pub fn new(parties: usize) -> Self {
        assert!(parties > 0, "barrier requires at least one party");
        Self {
            lock: Mutex::new(BarrierState {
                count: parties,
                generation: 0,
            }),
            cv: Condvar::new(),
            parties,
        }
    }

    /// Arrive at the barrier and block until the current cycle completes.
    ///
    /// The last arrival of a cycle returns without blocking; everyone else
    /// returns once that arrival has advanced the generation.
    pub fn wait(&self) {
        let mut state = self.lock.lock().unwrap();
        let arrival_generation = state.generation;
        state.count -= 1;
        if state.count == 0 {
            state.count = self.parties;
            state.generation = state.generation.wrapping_add(1);
            self.cv.notify_all();
        } else {
            while state.generation == arrival_generation {
                state = self.cv.wait(state).unwrap();
            }
        }
    }

    /// The fixed party count this barrier was built for.
    pub fn parties(&self) -> usize {
        self.parties
    }
}
