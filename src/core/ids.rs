//! Monotonic ID generators
//!
//! The ledger hands out sequential IDs for customers, accounts and
//! transactions. `IdSequence` is the single-threaded generator used by
//! `LedgerManager`; `AtomicIdSequence` is the lock-free counterpart used by
//! `SharedLedger`. Both only ever move forward, so every issued ID is unique
//! within its sequence.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequential ID generator
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Create a sequence whose first issued ID is `start`
    pub fn starting_at(start: u64) -> Self {
        IdSequence { next: start }
    }

    /// Issue the next ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Thread-safe sequential ID generator
///
/// Concurrent callers each receive a distinct ID; the order in which they
/// receive them follows the order of the underlying atomic increments.
#[derive(Debug)]
pub struct AtomicIdSequence {
    next: AtomicU64,
}

impl AtomicIdSequence {
    /// Create a sequence whose first issued ID is `start`
    pub fn starting_at(start: u64) -> Self {
        AtomicIdSequence {
            next: AtomicU64::new(start),
        }
    }

    /// Issue the next ID
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequence_starts_at_given_value_and_increments() {
        let mut seq = IdSequence::starting_at(1001);

        assert_eq!(seq.next_id(), 1001);
        assert_eq!(seq.next_id(), 1002);
        assert_eq!(seq.next_id(), 1003);
    }

    #[test]
    fn test_atomic_sequence_issues_unique_ids_across_threads() {
        let seq = Arc::new(AtomicIdSequence::starting_at(1));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let seq = Arc::clone(&seq);
                thread::spawn(move || (0..250).map(|_| seq.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }

        assert_eq!(seen.len(), 1000);
        assert_eq!(seen.iter().min(), Some(&1));
        assert_eq!(seen.iter().max(), Some(&1000));
    }
}
