//! QUIC frames
//!
//! The ACK frame range/gap codec (RFC 9000 §19.3) plus the content-free
//! PADDING and PING frames. Frames arrive inside already-decrypted packet
//! payloads; parsing here never panics on malformed bytes.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::error::{WireError, WireResult};
use crate::ranges::RangeSet;
use crate::varint;

/// ACK frame type without ECN counts.
pub const ACK_TYPE: u64 = 0x02;
/// ACK frame type with trailing ECN counts.
pub const ACK_ECN_TYPE: u64 = 0x03;

/// Frame types this codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Padding,
    Ping,
    Ack { ecn: bool },
}

impl FrameType {
    pub fn from_wire(value: u64) -> Option<Self> {
        match value {
            0x00 => Some(FrameType::Padding),
            0x01 => Some(FrameType::Ping),
            ACK_TYPE => Some(FrameType::Ack { ecn: false }),
            ACK_ECN_TYPE => Some(FrameType::Ack { ecn: true }),
            _ => None,
        }
    }
}

/// ECN codepoint counters carried by an ACK frame (RFC 9000 §19.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EcnCounts {
    /// Packets received with the ECT(0) codepoint.
    pub ect0: u64,
    /// Packets received with the ECT(1) codepoint.
    pub ect1: u64,
    /// Packets received with the CE (congestion experienced) codepoint.
    pub ce: u64,
}

impl EcnCounts {
    pub fn new(ect0: u64, ect1: u64, ce: u64) -> Self {
        Self { ect0, ect1, ce }
    }
}

/// ACK frame: acknowledged packet number ranges, ack delay and optional ECN
/// counters.
///
/// Ranges are kept in a [`RangeSet`], whose non-adjacency invariant is what
/// makes the `gap = previous smallest - upper - 2` encoding sound: two stored
/// ranges always have at least one unacknowledged number between them, so the
/// minimum legal gap on the wire is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckFrame {
    /// Raw ACK delay varint. The `ack_delay_exponent` scaling negotiated in
    /// transport parameters is not applied here; the transport layer owns
    /// that conversion.
    pub delay: u64,
    /// Acknowledged packet numbers. Never empty.
    pub ranges: RangeSet,
    pub ecn: Option<EcnCounts>,
}

impl AckFrame {
    /// Build an ACK frame without ECN counts.
    ///
    /// Panics on an empty range set; an ACK that acknowledges nothing is a
    /// caller bug.
    pub fn new(delay: u64, ranges: RangeSet) -> Self {
        assert!(!ranges.is_empty(), "ACK frame needs at least one range");
        Self { delay, ranges, ecn: None }
    }

    pub fn with_ecn(delay: u64, ranges: RangeSet, counts: EcnCounts) -> Self {
        assert!(!ranges.is_empty(), "ACK frame needs at least one range");
        Self { delay, ranges, ecn: Some(counts) }
    }

    /// Largest packet number this frame acknowledges.
    pub fn largest_acknowledged(&self) -> u64 {
        *self.ranges.span().expect("range set is never empty").end()
    }

    /// Serialize the frame, type varint included.
    pub fn write_to(&self, buf: &mut impl BufMut) {
        let mut ranges = self.ranges.iter_descending();
        let first = ranges.next().expect("range set is never empty");
        let (smallest, largest) = (*first.start(), *first.end());

        varint::write(buf, if self.ecn.is_some() { ACK_ECN_TYPE } else { ACK_TYPE });
        varint::write(buf, largest);
        varint::write(buf, self.delay);
        varint::write(buf, self.ranges.len() as u64 - 1);
        // First ACK range: contiguous packets directly below the largest
        varint::write(buf, largest - smallest);

        let mut previous_smallest = smallest;
        for range in ranges {
            // Stored ranges never touch, so this subtraction cannot underflow
            varint::write(buf, previous_smallest - *range.end() - 2);
            varint::write(buf, *range.end() - *range.start());
            previous_smallest = *range.start();
        }

        if let Some(ecn) = self.ecn {
            varint::write(buf, ecn.ect0);
            varint::write(buf, ecn.ect1);
            varint::write(buf, ecn.ce);
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write_to(&mut buf);
        buf.freeze()
    }

    /// Parse an ACK frame body; the type varint is expected to have been
    /// consumed already, with `has_ecn` telling which of the two types it
    /// was.
    ///
    /// Truncated input and range arithmetic that would go below packet
    /// number 0 both yield an error, never a panic.
    pub fn read_from(buf: &mut impl Buf, has_ecn: bool) -> WireResult<Self> {
        let largest = varint::read(buf)?;
        let delay = varint::read(buf)?;
        let range_count = varint::read(buf)?;
        let first_range = varint::read(buf)?;

        let mut smallest = largest.checked_sub(first_range).ok_or_else(|| {
            trace!(largest, first_range, "first ACK range underflows packet number 0");
            WireError::InvalidAckRange("first range below zero")
        })?;

        let mut ranges = RangeSet::new();
        ranges.insert(smallest..=largest);

        for _ in 0..range_count {
            let gap = varint::read(buf)?;
            let len = varint::read(buf)?;

            let upper = smallest
                .checked_sub(gap)
                .and_then(|v| v.checked_sub(2))
                .ok_or_else(|| {
                    trace!(smallest, gap, "ACK gap underflows packet number 0");
                    WireError::InvalidAckRange("gap below zero")
                })?;
            let lower = upper.checked_sub(len).ok_or_else(|| {
                trace!(upper, len, "ACK range length underflows packet number 0");
                WireError::InvalidAckRange("range length below zero")
            })?;

            ranges.insert(lower..=upper);
            smallest = lower;
        }

        let ecn = if has_ecn {
            Some(EcnCounts {
                ect0: varint::read(buf)?,
                ect1: varint::read(buf)?,
                ce: varint::read(buf)?,
            })
        } else {
            None
        };

        Ok(Self { delay, ranges, ecn })
    }
}

/// A decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Padding,
    Ping,
    Ack(AckFrame),
}

impl Frame {
    /// Parse one frame, type varint included.
    pub fn parse(buf: &mut impl Buf) -> WireResult<Self> {
        let type_value = varint::read(buf)?;
        match FrameType::from_wire(type_value) {
            Some(FrameType::Padding) => Ok(Frame::Padding),
            Some(FrameType::Ping) => Ok(Frame::Ping),
            Some(FrameType::Ack { ecn }) => Ok(Frame::Ack(AckFrame::read_from(buf, ecn)?)),
            None => {
                trace!(type_value, "unknown frame type");
                Err(WireError::UnknownFrameType(type_value))
            }
        }
    }

    pub fn write_to(&self, buf: &mut impl BufMut) {
        match self {
            Frame::Padding => varint::write(buf, 0x00),
            Frame::Ping => varint::write(buf, 0x01),
            Frame::Ack(ack) => ack.write_to(buf),
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write_to(&mut buf);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::RangeInclusive;

    fn ranges(set: &RangeSet) -> Vec<(u64, u64)> {
        set.iter().map(RangeInclusive::into_inner).collect()
    }

    #[test]
    fn test_encode_single_zero_packet() {
        let frame = AckFrame::new(0, RangeSet::from_ranges([0..=0]));
        // type, largest, delay, range count, first range
        assert_eq!(frame.to_bytes().as_ref(), [0x02, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_single_zero_packet_with_ecn() {
        let frame =
            AckFrame::with_ecn(0, RangeSet::from_ranges([0..=0]), EcnCounts::new(1, 2, 3));
        assert_eq!(frame.to_bytes().as_ref(), [0x03, 0, 0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_encode_single_nonzero_packet() {
        let frame = AckFrame::new(63, RangeSet::from_ranges([2..=2]));
        assert_eq!(frame.to_bytes().as_ref(), [0x02, 2, 63, 0, 0]);
    }

    #[test]
    fn test_encode_multiple_ranges() {
        let frame = AckFrame::new(63, RangeSet::from_ranges([2..=2, 0..=0]));
        // largest 2, first range 0, then gap 0 / len 0 down to packet 0
        assert_eq!(frame.to_bytes().as_ref(), [0x02, 2, 63, 1, 0, 0, 0]);
    }

    #[test]
    fn test_decode_single_zero_packet() {
        let frame = AckFrame::read_from(&mut &[0u8, 0, 0, 0][..], false).unwrap();
        assert_eq!(ranges(&frame.ranges), [(0, 0)]);
        assert_eq!(frame.delay, 0);
        assert_eq!(frame.ecn, None);
    }

    #[test]
    fn test_decode_with_ecn_counts() {
        let frame = AckFrame::read_from(&mut &[0u8, 0, 0, 0, 1, 2, 3][..], true).unwrap();
        assert_eq!(ranges(&frame.ranges), [(0, 0)]);
        assert_eq!(frame.ecn, Some(EcnCounts::new(1, 2, 3)));
    }

    #[test]
    fn test_decode_rejects_first_range_underflow() {
        // largest 0, first range 1 would acknowledge packet -1
        assert_eq!(
            AckFrame::read_from(&mut &[0u8, 0, 0, 1][..], false),
            Err(WireError::InvalidAckRange("first range below zero"))
        );
    }

    #[test]
    fn test_decode_gap_reaching_packet_zero() {
        let frame = AckFrame::read_from(&mut &[2u8, 0, 1, 0, 0, 0][..], false).unwrap();
        assert_eq!(ranges(&frame.ranges), [(0, 0), (2, 2)]);
    }

    #[test]
    fn test_decode_rejects_range_length_underflow() {
        // largest 2, gap 0 puts the next range at [?, 0]; length 1 goes negative
        assert_eq!(
            AckFrame::read_from(&mut &[2u8, 0, 1, 0, 0, 1][..], false),
            Err(WireError::InvalidAckRange("range length below zero"))
        );
    }

    #[test]
    fn test_decode_truncated_input() {
        assert_eq!(
            AckFrame::read_from(&mut &[2u8, 0][..], false),
            Err(WireError::UnexpectedEnd)
        );
        // ECN type but counters missing
        assert_eq!(
            AckFrame::read_from(&mut &[0u8, 0, 0, 0, 1][..], true),
            Err(WireError::UnexpectedEnd)
        );
    }

    #[test]
    fn test_ecn_round_trip() {
        let frame = AckFrame::with_ecn(
            5,
            RangeSet::from_ranges([7..=9, 0..=2]),
            EcnCounts::new(1, 2, 3),
        );
        let bytes = frame.to_bytes();
        assert_eq!(bytes[0], 0x03);

        let mut buf = bytes.clone();
        buf.advance(1);
        let decoded = AckFrame::read_from(&mut buf, true).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_multi_range_round_trip() {
        let original = AckFrame::new(
            1200,
            RangeSet::from_ranges([100_000..=100_010, 5_000..=5_001, 0..=0]),
        );
        let frame = match Frame::parse(&mut original.to_bytes()).unwrap() {
            Frame::Ack(frame) => frame,
            other => panic!("expected ACK, got {other:?}"),
        };
        assert_eq!(frame, original);
    }

    #[test]
    fn test_frame_type_dispatch() {
        assert_eq!(Frame::parse(&mut &[0x00u8][..]), Ok(Frame::Padding));
        assert_eq!(Frame::parse(&mut &[0x01u8][..]), Ok(Frame::Ping));
        assert_eq!(Frame::parse(&mut &[0x1eu8][..]), Err(WireError::UnknownFrameType(0x1e)));
        assert_eq!(Frame::parse(&mut &[][..]), Err(WireError::UnexpectedEnd));
    }

    #[test]
    fn test_padding_and_ping_serialization() {
        assert_eq!(Frame::Padding.to_bytes().as_ref(), [0x00]);
        assert_eq!(Frame::Ping.to_bytes().as_ref(), [0x01]);
    }

    #[test]
    #[should_panic(expected = "at least one range")]
    fn test_empty_range_set_is_a_contract_violation() {
        AckFrame::new(0, RangeSet::new());
    }
}
