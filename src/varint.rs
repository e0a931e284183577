//! QUIC variable-length integer encoding
//!
//! Unsigned integers up to 2^62 - 1 are encoded in 1, 2, 4 or 8 bytes
//! (RFC 9000 §16). The two most significant bits of the first byte select
//! the length class; the remaining bits hold the value, big-endian.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{WireError, WireResult};

/// Largest encodable value.
pub const MAX: u64 = (1 << 62) - 1;

/// Write `value` to `buf` in the minimal variable-length form.
///
/// Panics if `value` exceeds [`MAX`]; that is a caller bug, not peer data.
pub fn write(buf: &mut impl BufMut, value: u64) {
    // Only 62 bits of value fit - the top two carry the length class.
    assert!(value <= MAX, "varint value {value} out of range");

    if value >= 1 << 30 {
        buf.put_u64(0xc000_0000_0000_0000 | value);
    } else if value >= 1 << 14 {
        buf.put_u32(0x8000_0000 | value as u32);
    } else if value >= 1 << 6 {
        buf.put_u16(0x4000 | value as u16);
    } else {
        buf.put_u8(value as u8);
    }
}

/// Encode `value` into a freshly allocated buffer.
pub fn encode(value: u64) -> Bytes {
    let mut buf = BytesMut::with_capacity(size_of(value));
    write(&mut buf, value);
    buf.freeze()
}

/// Number of bytes [`write`] will emit for `value`.
pub fn size_of(value: u64) -> usize {
    if value >= 1 << 30 {
        8
    } else if value >= 1 << 14 {
        4
    } else if value >= 1 << 6 {
        2
    } else {
        1
    }
}

/// Read one variable-length integer from `buf`.
///
/// Returns [`WireError::UnexpectedEnd`] if the buffer runs out before the
/// byte count the first byte promises; no bytes beyond `buf` are touched and
/// this never panics.
pub fn read(buf: &mut impl Buf) -> WireResult<u64> {
    if !buf.has_remaining() {
        return Err(WireError::UnexpectedEnd);
    }

    let first = buf.get_u8();
    let extra = match first >> 6 {
        0b00 => 0,
        0b01 => 1,
        0b10 => 3,
        _ => 7,
    };

    if buf.remaining() < extra {
        return Err(WireError::UnexpectedEnd);
    }

    let mut value = (first & 0x3f) as u64;
    for _ in 0..extra {
        value = value << 8 | buf.get_u8() as u64;
    }
    Ok(value)
}
