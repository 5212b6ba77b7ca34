//! Per-product recheck state, keyed by product identity.
//!
//! The coordinator tracks which products have a recheck request in flight so
//! duplicate concurrent requests are never issued and the UI can disable the
//! action control per product. State is keyed by id, never by list position:
//! positions change across refetches, identity must not.

use std::collections::{HashMap, HashSet};

use pricewatch_core::ProductId;

/// Recheck state for a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecheckState {
    Idle,
    Rechecking,
}

/// Tracks, per product id, whether a recheck request is outstanding.
///
/// Entries are transient: a product is inserted when its recheck begins and
/// removed when it finishes, so absence of a key reads as [`RecheckState::Idle`].
#[derive(Debug, Default)]
pub struct RecheckCoordinator {
    states: HashMap<ProductId, RecheckState>,
}

impl RecheckCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The state for `id`; absent entries are `Idle`.
    #[must_use]
    pub fn state(&self, id: ProductId) -> RecheckState {
        self.states
            .get(&id)
            .copied()
            .unwrap_or(RecheckState::Idle)
    }

    #[must_use]
    pub fn is_rechecking(&self, id: ProductId) -> bool {
        self.state(id) == RecheckState::Rechecking
    }

    /// Attempts the `Idle → Rechecking` transition for `id`.
    ///
    /// Returns `false` when the product is already `Rechecking`; the caller
    /// must treat that as a re-entrant trigger and issue no request.
    pub fn begin(&mut self, id: ProductId) -> bool {
        match self.states.get(&id) {
            Some(RecheckState::Rechecking) => false,
            _ => {
                self.states.insert(id, RecheckState::Rechecking);
                true
            }
        }
    }

    /// Transitions `id` back to `Idle` regardless of the recheck's outcome.
    /// A no-op when the entry was already pruned.
    pub fn finish(&mut self, id: ProductId) {
        self.states.remove(&id);
    }

    /// Prunes entries for products no longer tracked, upholding the
    /// invariant that no untracked product ever reads as busy.
    pub fn retain_tracked(&mut self, tracked: &HashSet<ProductId>) {
        self.states.retain(|id, _| tracked.contains(id));
    }

    /// Number of products currently `Rechecking`.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == RecheckState::Rechecking)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entry_reads_as_idle() {
        let coordinator = RecheckCoordinator::new();
        assert_eq!(coordinator.state(1), RecheckState::Idle);
        assert!(!coordinator.is_rechecking(1));
    }

    #[test]
    fn begin_transitions_to_rechecking() {
        let mut coordinator = RecheckCoordinator::new();
        assert!(coordinator.begin(1));
        assert!(coordinator.is_rechecking(1));
        assert_eq!(coordinator.active_count(), 1);
    }

    #[test]
    fn begin_rejects_reentrant_trigger() {
        let mut coordinator = RecheckCoordinator::new();
        assert!(coordinator.begin(1));
        assert!(!coordinator.begin(1));
        assert_eq!(coordinator.active_count(), 1);
    }

    #[test]
    fn finish_returns_to_idle() {
        let mut coordinator = RecheckCoordinator::new();
        coordinator.begin(1);
        coordinator.finish(1);
        assert_eq!(coordinator.state(1), RecheckState::Idle);
        assert_eq!(coordinator.active_count(), 0);
    }

    #[test]
    fn finish_is_noop_for_unknown_id() {
        let mut coordinator = RecheckCoordinator::new();
        coordinator.finish(99);
        assert_eq!(coordinator.active_count(), 0);
    }

    #[test]
    fn products_are_tracked_independently() {
        let mut coordinator = RecheckCoordinator::new();
        assert!(coordinator.begin(1));
        assert!(coordinator.begin(2));
        coordinator.finish(1);
        assert!(!coordinator.is_rechecking(1));
        assert!(coordinator.is_rechecking(2));
    }

    #[test]
    fn retain_tracked_prunes_dropped_products() {
        let mut coordinator = RecheckCoordinator::new();
        coordinator.begin(1);
        coordinator.begin(2);
        let tracked: HashSet<ProductId> = [1].into_iter().collect();
        coordinator.retain_tracked(&tracked);
        assert!(coordinator.is_rechecking(1));
        assert!(!coordinator.is_rechecking(2));
    }
}
