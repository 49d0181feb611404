//! # Replicable pseudo-random number generation.
//!
//! [`RandomHub`] hands out pseudo-random values from a seeded generator and
//! records the seed so a run can be replicated exactly. Like
//! [`OutputManager`](crate::OutputManager) it is scoped at construction:
//!
//! - [`ScopeKind::Process`] — one generator shared by every caller (calls
//!   serialize on a lock; interleaving across threads still makes replay of
//!   concurrent runs unreliable, so prefer the per-thread scope there).
//! - [`ScopeKind::PerThread`] — one generator per calling thread, created
//!   lazily with a fresh clock seed and released explicitly via
//!   [`RandomHub::release_current_thread`].
//!
//! Setting a seed rebuilds the stream deterministically: two hubs (or one hub
//! re-seeded) produce identical sequences for identical seeds.

use std::collections::HashMap;
use std::thread::{self, ThreadId};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::manager::ScopeKind;

struct RandomSlot {
    seed: u64,
    rng: StdRng,
}

impl RandomSlot {
    fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn fresh() -> Self {
        Self::seeded(clock_seed())
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

enum RandomScope {
    Process(Mutex<RandomSlot>),
    PerThread(Mutex<HashMap<ThreadId, RandomSlot>>),
}

/// Scoped source of replicable pseudo-random values.
pub struct RandomHub {
    scope: RandomScope,
}

impl Default for RandomHub {
    fn default() -> Self {
        Self::process_wide()
    }
}

impl RandomHub {
    /// Creates a hub with the given scope, seeded from the system clock.
    pub fn new(kind: ScopeKind) -> Self {
        let scope = match kind {
            ScopeKind::Process => RandomScope::Process(Mutex::new(RandomSlot::fresh())),
            ScopeKind::PerThread => RandomScope::PerThread(Mutex::new(HashMap::new())),
        };
        Self { scope }
    }

    /// Process-wide hub seeded from the system clock.
    pub fn process_wide() -> Self {
        Self::new(ScopeKind::Process)
    }

    /// Per-thread hub; each thread's generator is seeded on first access.
    pub fn per_thread() -> Self {
        Self::new(ScopeKind::PerThread)
    }

    /// Process-wide hub with an explicit seed, for replicated experiments.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            scope: RandomScope::Process(Mutex::new(RandomSlot::seeded(seed))),
        }
    }

    /// The scope strategy this hub was built with.
    pub fn scope_kind(&self) -> ScopeKind {
        match self.scope {
            RandomScope::Process(_) => ScopeKind::Process,
            RandomScope::PerThread(_) => ScopeKind::PerThread,
        }
    }

    fn with_slot<R>(&self, f: impl FnOnce(&mut RandomSlot) -> R) -> R {
        match &self.scope {
            RandomScope::Process(slot) => f(&mut slot.lock()),
            RandomScope::PerThread(map) => {
                let mut map = map.lock();
                let slot = map
                    .entry(thread::current().id())
                    .or_insert_with(RandomSlot::fresh);
                f(slot)
            }
        }
    }

    /// The seed that produced the current stream (for the calling thread, in
    /// the per-thread scope).
    pub fn seed(&self) -> u64 {
        self.with_slot(|slot| slot.seed)
    }

    /// Restarts the stream deterministically from `seed`.
    pub fn set_seed(&self, seed: u64) {
        self.with_slot(|slot| *slot = RandomSlot::seeded(seed));
    }

    /// Uniform integer in `0..max`; returns 0 when `max` is 0.
    pub fn next_below(&self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        self.with_slot(|slot| slot.rng.gen_range(0..max))
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&self) -> f64 {
        self.with_slot(|slot| slot.rng.gen::<f64>())
    }

    /// Fair coin flip.
    pub fn next_bool(&self) -> bool {
        self.with_slot(|slot| slot.rng.gen::<bool>())
    }

    /// Shuffles a slice in place (Fisher–Yates).
    pub fn shuffle<T>(&self, items: &mut [T]) {
        self.with_slot(|slot| items.shuffle(&mut slot.rng));
    }

    /// Runs `f` with direct access to the calling scope's generator.
    pub fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        self.with_slot(|slot| f(&mut slot.rng))
    }

    /// Drops the calling thread's generator (per-thread scope only).
    pub fn release_current_thread(&self) {
        if let RandomScope::PerThread(map) = &self.scope {
            map.lock().remove(&thread::current().id());
        }
    }
}
