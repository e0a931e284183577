//! Closed integer interval sets
//!
//! [`RangeSet`] holds disjoint closed ranges over `u64`, sorted ascending,
//! and merges on insert. Overlapping and merely adjacent ranges collapse into
//! one, so consecutive stored ranges always leave at least one value
//! uncovered between them. ACK encoding relies on that invariant: the gap
//! between two ranges is never negative.

use std::ops::RangeInclusive;

/// Set of disjoint, non-adjacent closed `u64` intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    // (lo, hi) pairs, ascending by lo.
    ranges: Vec<(u64, u64)>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn from_ranges(iter: impl IntoIterator<Item = RangeInclusive<u64>>) -> Self {
        let mut set = Self::new();
        for range in iter {
            set.insert(range);
        }
        set
    }

    /// Insert a closed range, merging every stored range it overlaps or
    /// touches.
    pub fn insert(&mut self, range: RangeInclusive<u64>) {
        let (mut lo, mut hi) = range.into_inner();
        assert!(lo <= hi, "range start above end");

        // First stored range whose upper end reaches lo - 1 can merge.
        let start = self.ranges.partition_point(|&(_, h)| h < lo.saturating_sub(1));
        let mut end = start;
        while end < self.ranges.len() && self.ranges[end].0 <= hi.saturating_add(1) {
            lo = lo.min(self.ranges[end].0);
            hi = hi.max(self.ranges[end].1);
            end += 1;
        }
        self.ranges.splice(start..end, [(lo, hi)]);
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of stored ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Smallest range covering the whole set, or `None` when empty.
    pub fn span(&self) -> Option<RangeInclusive<u64>> {
        match (self.ranges.first(), self.ranges.last()) {
            (Some(&(lo, _)), Some(&(_, hi))) => Some(lo..=hi),
            _ => None,
        }
    }

    pub fn contains(&self, value: u64) -> bool {
        let idx = self.ranges.partition_point(|&(lo, _)| lo <= value);
        idx > 0 && self.ranges[idx - 1].1 >= value
    }

    /// Ranges in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = RangeInclusive<u64>> + '_ {
        self.ranges.iter().map(|&(lo, hi)| lo..=hi)
    }

    /// Ranges from highest to lowest, the order ACK encoding walks them.
    pub fn iter_descending(&self) -> impl Iterator<Item = RangeInclusive<u64>> + '_ {
        self.iter().rev()
    }
}

impl FromIterator<RangeInclusive<u64>> for RangeSet {
    fn from_iter<I: IntoIterator<Item = RangeInclusive<u64>>>(iter: I) -> Self {
        Self::from_ranges(iter)
    }
}
