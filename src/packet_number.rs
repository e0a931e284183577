//! Packet number truncation
//!
//! Packet numbers ride in long headers as 1 to 4 big-endian bytes, with the
//! byte count minus one carried in the header's type-specific bits.

use bytes::{BufMut, Bytes, BytesMut};

/// A packet number and the minimal wire width that represents it.
///
/// The width is derived from the absolute value alone. RFC 9000 §17.1 instead
/// truncates relative to the largest acknowledged packet number so the peer
/// can reconstruct the full value; callers that need peer-reconstructible
/// numbers must choose the width at the loss-recovery layer before building
/// the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PacketNumber {
    number: u32,
    encoded_length: u8,
}

impl PacketNumber {
    pub fn new(number: u32) -> Self {
        Self { number, encoded_length: encoded_length(number) }
    }

    pub fn value(self) -> u32 {
        self.number
    }

    /// Minimal byte count minus one, in `0..=3`. Doubles as the packet
    /// number length nibble of a long header byte.
    pub fn encoded_length(self) -> u8 {
        self.encoded_length
    }

    /// Bytes this number occupies on the wire.
    pub fn bytes_needed(self) -> usize {
        self.encoded_length as usize + 1
    }

    /// Write the minimal big-endian truncation of the number.
    pub fn write_to(self, buf: &mut impl BufMut) {
        match self.encoded_length {
            0 => buf.put_u8(self.number as u8),
            1 => buf.put_u16(self.number as u16),
            2 => buf.put_uint(self.number as u64, 3),
            _ => buf.put_u32(self.number),
        }
    }

    pub fn to_bytes(self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.bytes_needed());
        self.write_to(&mut buf);
        buf.freeze()
    }
}

fn encoded_length(number: u32) -> u8 {
    if number & 0xffff_ff00 == 0 {
        0
    } else if number & 0xffff_0000 == 0 {
        1
    } else if number & 0xff00_0000 == 0 {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_length_one_byte_values() {
        assert_eq!(PacketNumber::new(1).encoded_length(), 0);
        assert_eq!(PacketNumber::new(127).encoded_length(), 0);
        assert_eq!(PacketNumber::new(1 << 7).encoded_length(), 0);
        assert_eq!(PacketNumber::new(1).bytes_needed(), 1);
    }

    #[test]
    fn test_encoded_length_two_byte_values() {
        assert_eq!(PacketNumber::new(256).encoded_length(), 1);
        assert_eq!(PacketNumber::new(32767).encoded_length(), 1);
        assert_eq!(PacketNumber::new(1 << 15).encoded_length(), 1);
        assert_eq!(PacketNumber::new(256).bytes_needed(), 2);
    }

    #[test]
    fn test_encoded_length_three_byte_values() {
        assert_eq!(PacketNumber::new(65536).encoded_length(), 2);
        assert_eq!(PacketNumber::new(8388607).encoded_length(), 2);
        assert_eq!(PacketNumber::new(65536).bytes_needed(), 3);
    }

    #[test]
    fn test_encoded_length_four_byte_values() {
        assert_eq!(PacketNumber::new(16777216).encoded_length(), 3);
        assert_eq!(PacketNumber::new(u32::MAX).encoded_length(), 3);
        assert_eq!(PacketNumber::new(16777216).bytes_needed(), 4);
    }

    #[test]
    fn test_serialization_is_minimal_big_endian() {
        assert_eq!(PacketNumber::new(5).to_bytes().as_ref(), [0x05]);
        assert_eq!(PacketNumber::new(0x0102).to_bytes().as_ref(), [0x01, 0x02]);
        assert_eq!(PacketNumber::new(0x012345).to_bytes().as_ref(), [0x01, 0x23, 0x45]);
        assert_eq!(PacketNumber::new(1 << 25).to_bytes().as_ref(), [0x02, 0x00, 0x00, 0x00]);
    }
}
