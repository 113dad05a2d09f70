//! Identifier sources for incremental units.
//!
//! Units never pick their own id: the graph that owns them hands out an
//! [`IdSource`]. [`SequentialIds`] gives provable uniqueness within one
//! source; [`RandomIds`] gives ids that are unlikely to clash across
//! independent sources but can collide, and nothing here detects that.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::UnitId;

/// A generator of unit identifiers, shareable across threads.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> UnitId;
}

impl<T: IdSource + ?Sized> IdSource for &T {
    fn next_id(&self) -> UnitId { (**self).next_id() }
}

impl<T: IdSource + ?Sized> IdSource for Box<T> {
    fn next_id(&self) -> UnitId { (**self).next_id() }
}

impl<T: IdSource + ?Sized> IdSource for Arc<T> {
    fn next_id(&self) -> UnitId { (**self).next_id() }
}

// ============================================================================
// SequentialIds
// ============================================================================

/// Monotonic counter. Ids are unique until the counter wraps.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Counter starting at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(start: u64) -> Self {
        Self { next: AtomicU64::new(start) }
    }

    /// The id the next call to [`IdSource::next_id`] will return.
    pub fn peek(&self) -> UnitId {
        UnitId(self.next.load(Ordering::Relaxed))
    }
}

impl Default for SequentialIds {
    fn default() -> Self { Self::new() }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> UnitId {
        UnitId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

// ============================================================================
// RandomIds
// ============================================================================

/// Uniformly random 64-bit ids.
///
/// Two sources built from the same seed produce the same sequence.
#[derive(Debug)]
pub struct RandomIds {
    rng: Mutex<StdRng>,
}

impl RandomIds {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    /// Reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl Default for RandomIds {
    fn default() -> Self { Self::new() }
}

impl IdSource for RandomIds {
    fn next_id(&self) -> UnitId {
        UnitId(self.rng.lock().r#gen::<u64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_sequential_increases() {
        let ids = SequentialIds::starting_at(5);
        assert_eq!(ids.peek(), UnitId(5));
        assert_eq!(ids.next_id(), UnitId(5));
        assert_eq!(ids.next_id(), UnitId(6));
        assert_eq!(ids.peek(), UnitId(7));
    }

    #[test]
    fn test_sequential_unique_across_threads() {
        let ids = Arc::new(SequentialIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = RandomIds::seeded(42);
        let b = RandomIds::seeded(42);
        let from_a: Vec<_> = (0..8).map(|_| a.next_id()).collect();
        let from_b: Vec<_> = (0..8).map(|_| b.next_id()).collect();
        assert_eq!(from_a, from_b);
    }

    #[test]
    fn test_independent_random_sources_can_collide() {
        // Nothing stops two sources from handing out the same id.
        let a = RandomIds::seeded(7);
        let b = RandomIds::seeded(7);
        assert_eq!(a.next_id(), b.next_id());
    }

    #[test]
    fn test_forwarding_impls() {
        fn draw<S: IdSource>(source: S) -> UnitId {
            source.next_id()
        }

        let ids = SequentialIds::new();
        assert_eq!(draw(&ids), UnitId(1));
        assert_eq!(draw(Box::new(SequentialIds::starting_at(3)) as Box<dyn IdSource>), UnitId(3));
        assert_eq!(draw(Arc::new(RandomIds::seeded(1))), RandomIds::seeded(1).next_id());
        assert_eq!(ids.peek(), UnitId(2));
    }
}
