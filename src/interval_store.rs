//! A labelled interval set, instantiated twice by `Engine` (presence,
//! obligation). Indexed by `(max, owner)` so an owner's open interval
//! always sits at the key `(time::MAX, owner)`.

use {
    crate::interval::Interval,
    crate::registry::PersonId,
    crate::time::{self, Time},
    std::collections::BTreeMap,
    thiserror::Error,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntervalStoreError {
    #[error("owner {0} has no open interval to close")]
    NoOpenInterval(PersonId),
    #[error("owner {0} already has an open interval")]
    AlreadyOpen(PersonId),
}

#[derive(Debug, Default)]
pub struct IntervalStore {
    by_max_owner: BTreeMap<(Time, PersonId), Interval>,
}

impl IntervalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, owner: PersonId, min: Time, max: Time) {
        self.by_max_owner
            .insert((max, owner), Interval::new(owner, min, max));
    }

    /// Fails if `owner` has no open interval.
    pub fn close_open(&mut self, owner: PersonId, end: Time) -> Result<(), IntervalStoreError> {
        let iv = self
            .by_max_owner
            .remove(&(time::MAX, owner))
            .ok_or(IntervalStoreError::NoOpenInterval(owner))?;
        self.by_max_owner
            .insert((end, owner), Interval::new(owner, iv.min, end));
        Ok(())
    }

    pub fn has_open(&self, owner: PersonId) -> bool {
        self.by_max_owner.contains_key(&(time::MAX, owner))
    }

    /// `iv.max >= win_min && iv.min < win_max`; a point query
    /// (`win_min == win_max == t`) instead uses `iv.min <= t <= iv.max`.
    pub fn intersect(&self, win_min: Time, win_max: Time) -> impl Iterator<Item = Interval> + '_ {
        let point_query = win_min == win_max;
        self.by_max_owner
            .range((win_min, PersonId::MIN)..)
            .map(|(_, iv)| *iv)
            .filter(move |iv| {
                if point_query {
                    iv.min <= win_max
                } else {
                    iv.min < win_max
                }
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = Interval> + '_ {
        self.by_max_owner.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_point_query() {
        let mut store = IntervalStore::new();
        store.insert(0, 10, 20);
        let hits: Vec<_> = store.intersect(15, 15).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].owner, 0);
    }

    #[test]
    fn window_query_includes_interval_touching_win_min() {
        let mut store = IntervalStore::new();
        store.insert(0, 0, 10);
        // query window [10, 20): max == win_min is a match per `max >= win_min`.
        let hits: Vec<_> = store.intersect(10, 20).collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn window_query_excludes_interval_starting_at_win_max() {
        let mut store = IntervalStore::new();
        store.insert(0, 10, 20);
        // query window [0, 10): min == win_max is never a match, regardless
        // of how far max extends past the window.
        let hits: Vec<_> = store.intersect(0, 10).collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn point_query_is_inclusive_both_ends() {
        let mut store = IntervalStore::new();
        store.insert(0, 10, 20);
        assert_eq!(store.intersect(10, 10).count(), 1);
        assert_eq!(store.intersect(20, 20).count(), 1);
        assert_eq!(store.intersect(9, 9).count(), 0);
        assert_eq!(store.intersect(21, 21).count(), 0);
    }

    #[test]
    fn close_open_requires_an_open_interval() {
        let mut store = IntervalStore::new();
        assert_eq!(
            store.close_open(0, 100),
            Err(IntervalStoreError::NoOpenInterval(0))
        );
        store.insert(0, 10, time::MAX);
        assert!(store.close_open(0, 100).is_ok());
        assert_eq!(
            store.close_open(0, 200),
            Err(IntervalStoreError::NoOpenInterval(0))
        );
    }

    #[test]
    fn close_open_preserves_min_and_sets_max() {
        let mut store = IntervalStore::new();
        store.insert(7, 50, time::MAX);
        store.close_open(7, 99).unwrap();
        let hits: Vec<_> = store.intersect(50, 99).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].min, 50);
        assert_eq!(hits[0].max, 99);
    }

    #[test]
    fn sentinel_intervals_intersect_every_finite_window() {
        let mut store = IntervalStore::new();
        store.insert(0, time::MIN, time::MAX);
        let hits: Vec<_> = store.intersect(1_000, 2_000).collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn has_open_reflects_store_state() {
        let mut store = IntervalStore::new();
        assert!(!store.has_open(0));
        store.insert(0, 10, time::MAX);
        assert!(store.has_open(0));
        store.close_open(0, 20).unwrap();
        assert!(!store.has_open(0));
    }

    #[test]
    fn multiple_owners_do_not_interfere() {
        let mut store = IntervalStore::new();
        store.insert(0, 0, time::MAX);
        store.insert(1, 0, time::MAX);
        store.close_open(0, 10).unwrap();
        assert!(!store.has_open(0));
        assert!(store.has_open(1));
    }
}
