//! Receive-side packet number accounting

use std::ops::RangeInclusive;

use crate::ranges::RangeSet;

/// Accumulates acknowledged packet number ranges for one packet number
/// space.
///
/// Append-only: ranges are merged in and never removed. A single connection
/// context owns each instance; concurrent use needs external
/// synchronization.
#[derive(Debug, Clone, Default)]
pub struct PacketNumberSpace {
    ack_ranges: RangeSet,
}

impl PacketNumberSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contiguous run of received packet numbers. Overlapping or
    /// adjacent runs merge with what is already recorded.
    pub fn ack(&mut self, range: RangeInclusive<u64>) {
        self.ack_ranges.insert(range);
    }

    /// Upper bound over everything acknowledged so far, or `None` before the
    /// first `ack`.
    pub fn largest_acknowledged(&self) -> Option<u64> {
        self.ack_ranges.span().map(|span| *span.end())
    }

    pub fn ranges(&self) -> &RangeSet {
        &self.ack_ranges
    }
}
