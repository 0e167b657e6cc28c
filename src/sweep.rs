//! Decomposes a set of intervals, already clipped to a window, into maximal
//! constant-occupancy sub-intervals.
//!
//! Events are sorted by time, and at equal times CLOSE is processed before
//! OPEN, so an interval ending at `t` is never seen as co-occupying the
//! instant with one starting at `t`.

use {
    crate::interval::Interval, crate::registry::PersonId, crate::time::Time,
    std::collections::BTreeSet,
};

/// A maximal sub-interval `[start, end)` and the set of owners present
/// throughout it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub start: Time,
    pub end: Time,
    pub occupants: BTreeSet<PersonId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Kind {
    Close,
    Open,
}

/// Runs the sweep over `intervals`, which the caller must already have
/// clipped to `[w0, w1]` (see `Interval::clip`). Zero-length intervals
/// (`min == max`) contribute no events.
pub fn split(intervals: &[Interval]) -> Vec<Split> {
    let mut events: Vec<(Time, Kind, PersonId)> = Vec::with_capacity(intervals.len() * 2);
    for iv in intervals {
        if iv.min == iv.max {
            continue;
        }
        events.push((iv.min, Kind::Open, iv.owner));
        events.push((iv.max, Kind::Close, iv.owner));
    }
    events.sort_unstable();

    let mut splits = Vec::new();
    let mut live: BTreeSet<PersonId> = BTreeSet::new();
    let mut i = 0;
    while i < events.len() {
        let t = events[i].0;
        // Apply every event at this timestamp before considering the next
        // boundary, since CLOSE-before-OPEN is already encoded by sort order.
        while i < events.len() && events[i].0 == t {
            let (_, kind, owner) = events[i];
            match kind {
                Kind::Close => {
                    live.remove(&owner);
                }
                Kind::Open => {
                    live.insert(owner);
                }
            }
            i += 1;
        }
        if i >= events.len() {
            break;
        }
        let next_t = events[i].0;
        if next_t > t && !live.is_empty() {
            splits.push(Split {
                start: t,
                end: next_t,
                occupants: live.clone(),
            });
        }
    }
    splits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time;

    fn set(ids: &[PersonId]) -> BTreeSet<PersonId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn single_interval_yields_single_split() {
        let ivs = vec![Interval::new(0, 10, 20)];
        let splits = split(&ivs);
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].start, 10);
        assert_eq!(splits[0].end, 20);
        assert_eq!(splits[0].occupants, set(&[0]));
    }

    #[test]
    fn disjoint_intervals_leave_a_gap_with_no_split() {
        let ivs = vec![Interval::new(0, 0, 10), Interval::new(1, 20, 30)];
        let splits = split(&ivs);
        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].occupants, set(&[0]));
        assert_eq!(splits[1].occupants, set(&[1]));
        // the gap [10, 20) is simply absent, not emitted as an empty split
        assert_eq!(splits[0].end, 10);
        assert_eq!(splits[1].start, 20);
    }

    #[test]
    fn overlapping_intervals_produce_three_splits() {
        // alice [0,20), bob [10,30)
        let ivs = vec![Interval::new(0, 0, 20), Interval::new(1, 10, 30)];
        let splits = split(&ivs);
        assert_eq!(splits.len(), 3);
        assert_eq!((splits[0].start, splits[0].end), (0, 10));
        assert_eq!(splits[0].occupants, set(&[0]));
        assert_eq!((splits[1].start, splits[1].end), (10, 20));
        assert_eq!(splits[1].occupants, set(&[0, 1]));
        assert_eq!((splits[2].start, splits[2].end), (20, 30));
        assert_eq!(splits[2].occupants, set(&[1]));
    }

    #[test]
    fn adjacent_intervals_at_shared_boundary_never_overlap() {
        // alice [0,10), bob [10,20): CLOSE-before-OPEN means no instant
        // shows both present.
        let ivs = vec![Interval::new(0, 0, 10), Interval::new(1, 10, 20)];
        let splits = split(&ivs);
        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].occupants, set(&[0]));
        assert_eq!(splits[1].occupants, set(&[1]));
    }

    #[test]
    fn zero_length_interval_contributes_nothing() {
        let ivs = vec![Interval::new(0, 10, 10), Interval::new(1, 0, 20)];
        let splits = split(&ivs);
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].occupants, set(&[1]));
    }

    #[test]
    fn empty_input_yields_no_splits() {
        assert!(split(&[]).is_empty());
    }

    #[test]
    fn splits_partition_the_window_exactly() {
        let ivs = vec![
            Interval::new(0, time::MIN, 100).clip(0, 300),
            Interval::new(1, 150, time::MAX).clip(0, 300),
        ];
        let splits = split(&ivs);
        for pair in splits.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "splits must be contiguous");
        }
        assert_ne!(splits[0].occupants, splits[1].occupants);
    }
}
