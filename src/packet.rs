//! Long header packet framing
//!
//! Implements the RFC 9000 §17.2 long header layout used before a connection
//! reaches the short-header phase: Initial, 0-RTT, Handshake and Retry, plus
//! the version negotiation packet. Header protection and payload encryption
//! happen outside this crate; the framing here deals in plaintext bytes.
//!
//! Wire order: header byte, 32-bit version, length-prefixed destination
//! connection ID, length-prefixed source connection ID, then the payload's
//! own serialization.

use bytes::{BufMut, Bytes, BytesMut};

use crate::connection_id::ConnectionId;
use crate::packet_number::PacketNumber;
use crate::varint;
use crate::version::Version;

/// Header form bit; set on every long header packet.
pub const FORM_BIT: u8 = 0x80;
/// Fixed bit; must be set for all QUIC v1 packets.
pub const FIXED_BIT: u8 = 0x40;

/// Version negotiation packets strictly only need the form bit, but we also
/// set the fixed bit and the top two type-specific bits so the packet keeps
/// looking like QUIC to anything that inspects more than one bit.
const VERSION_NEGOTIATION_HEADER: u8 = FORM_BIT | FIXED_BIT | 0x0c;

/// Capability of serializing a packet payload to wire bytes.
pub trait WirePayload {
    fn to_bytes(&self) -> Bytes;
}

/// Long packet types and their two-bit wire codes (header bits 5-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketType {
    Initial = 0x0,
    ZeroRtt = 0x1,
    Handshake = 0x2,
    Retry = 0x3,
}

/// A long header packet generic over its payload.
///
/// Connection IDs are captured as shared buffer handles, so the packet stays
/// valid after the caller drops its own references.
#[derive(Debug, Clone)]
pub struct LongHeaderPacket<P> {
    header: u8,
    version: Version,
    dest_id: ConnectionId,
    source_id: ConnectionId,
    payload: P,
}

impl<P: WirePayload> LongHeaderPacket<P> {
    fn from_parts(
        packet_type: PacketType,
        type_specific: u8,
        version: Version,
        dest_id: ConnectionId,
        source_id: ConnectionId,
        payload: P,
    ) -> Self {
        let header = FORM_BIT | FIXED_BIT | (packet_type as u8) << 4 | (type_specific & 0x0f);
        Self::with_header(header, version, dest_id, source_id, payload)
    }

    fn with_header(
        header: u8,
        version: Version,
        dest_id: ConnectionId,
        source_id: ConnectionId,
        payload: P,
    ) -> Self {
        Self { header, version, dest_id, source_id, payload }
    }

    pub fn header_byte(&self) -> u8 {
        self.header
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn dest_id(&self) -> &ConnectionId {
        &self.dest_id
    }

    pub fn source_id(&self) -> &ConnectionId {
        &self.source_id
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn write_to(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.header);
        buf.put_u32(self.version.value());
        self.dest_id.write_to(buf);
        self.source_id.write_to(buf);
        buf.put_slice(&self.payload.to_bytes());
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write_to(&mut buf);
        buf.freeze()
    }
}

/// Packet-number-bearing payload shared by 0-RTT and Handshake packets.
///
/// Wire form: varint remaining length (packet number bytes plus payload
/// bytes), packet number, payload. The length field lets a parser step over
/// the packet without decrypting it.
#[derive(Debug, Clone)]
pub struct NumberedPayload {
    number: PacketNumber,
    payload: Bytes,
}

impl NumberedPayload {
    pub fn new(number: PacketNumber, payload: Bytes) -> Self {
        Self { number, payload }
    }

    pub fn number(&self) -> PacketNumber {
        self.number
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}

impl WirePayload for NumberedPayload {
    fn to_bytes(&self) -> Bytes {
        let remaining = self.number.bytes_needed() + self.payload.len();
        let mut buf = BytesMut::with_capacity(varint::size_of(remaining as u64) + remaining);
        varint::write(&mut buf, remaining as u64);
        self.number.write_to(&mut buf);
        buf.put_slice(&self.payload);
        buf.freeze()
    }
}

/// Initial packet payload: address validation token ahead of the numbered
/// payload. The token length rides in a fixed 32-bit prefix.
#[derive(Debug, Clone)]
pub struct InitialPayload {
    token: Bytes,
    inner: NumberedPayload,
}

impl InitialPayload {
    pub fn new(token: Bytes, number: PacketNumber, payload: Bytes) -> Self {
        Self { token, inner: NumberedPayload::new(number, payload) }
    }

    pub fn token(&self) -> &Bytes {
        &self.token
    }

    pub fn number(&self) -> PacketNumber {
        self.inner.number()
    }

    pub fn payload(&self) -> &Bytes {
        self.inner.payload()
    }
}

impl WirePayload for InitialPayload {
    fn to_bytes(&self) -> Bytes {
        let inner = self.inner.to_bytes();
        let mut buf = BytesMut::with_capacity(4 + self.token.len() + inner.len());
        buf.put_u32(self.token.len() as u32);
        buf.put_slice(&self.token);
        buf.put_slice(&inner);
        buf.freeze()
    }
}

/// Length of the Retry integrity tag (RFC 9001 §5.8).
pub const RETRY_INTEGRITY_TAG_LEN: usize = 16;

/// Retry packet payload: a new address validation token followed by the
/// 128-bit integrity tag. Retry packets carry no packet number; they are
/// unprotected control packets.
#[derive(Debug, Clone)]
pub struct RetryPayload {
    token: Bytes,
    integrity_tag: [u8; RETRY_INTEGRITY_TAG_LEN],
}

impl RetryPayload {
    pub fn new(token: Bytes, integrity_tag: [u8; RETRY_INTEGRITY_TAG_LEN]) -> Self {
        Self { token, integrity_tag }
    }

    pub fn token(&self) -> &Bytes {
        &self.token
    }

    pub fn integrity_tag(&self) -> &[u8; RETRY_INTEGRITY_TAG_LEN] {
        &self.integrity_tag
    }
}

impl WirePayload for RetryPayload {
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.token.len() + RETRY_INTEGRITY_TAG_LEN);
        buf.put_slice(&self.token);
        buf.put_slice(&self.integrity_tag);
        buf.freeze()
    }
}

/// Version negotiation payload: one 32-bit word per supported version.
#[derive(Debug, Clone)]
pub struct VersionNegotiationPayload {
    supported: Vec<Version>,
}

impl VersionNegotiationPayload {
    pub fn new(supported: Vec<Version>) -> Self {
        Self { supported }
    }

    pub fn supported(&self) -> &[Version] {
        &self.supported
    }
}

impl WirePayload for VersionNegotiationPayload {
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.supported.len() * 4);
        for version in &self.supported {
            buf.put_u32(version.value());
        }
        buf.freeze()
    }
}

pub type InitialPacket = LongHeaderPacket<InitialPayload>;
pub type ZeroRttPacket = LongHeaderPacket<NumberedPayload>;
pub type HandshakePacket = LongHeaderPacket<NumberedPayload>;
pub type RetryPacket = LongHeaderPacket<RetryPayload>;
pub type VersionNegotiationPacket = LongHeaderPacket<VersionNegotiationPayload>;

impl LongHeaderPacket<InitialPayload> {
    /// The packet number length nibble rides in the type-specific bits.
    pub fn new(
        version: Version,
        dest_id: ConnectionId,
        source_id: ConnectionId,
        payload: InitialPayload,
    ) -> Self {
        let nibble = payload.number().encoded_length();
        Self::from_parts(PacketType::Initial, nibble, version, dest_id, source_id, payload)
    }
}

impl LongHeaderPacket<NumberedPayload> {
    pub fn zero_rtt(
        version: Version,
        dest_id: ConnectionId,
        source_id: ConnectionId,
        payload: NumberedPayload,
    ) -> Self {
        let nibble = payload.number().encoded_length();
        Self::from_parts(PacketType::ZeroRtt, nibble, version, dest_id, source_id, payload)
    }

    pub fn handshake(
        version: Version,
        dest_id: ConnectionId,
        source_id: ConnectionId,
        payload: NumberedPayload,
    ) -> Self {
        let nibble = payload.number().encoded_length();
        Self::from_parts(PacketType::Handshake, nibble, version, dest_id, source_id, payload)
    }
}

impl LongHeaderPacket<RetryPayload> {
    pub fn new(
        version: Version,
        dest_id: ConnectionId,
        source_id: ConnectionId,
        payload: RetryPayload,
    ) -> Self {
        Self::from_parts(PacketType::Retry, 0, version, dest_id, source_id, payload)
    }
}

impl LongHeaderPacket<VersionNegotiationPayload> {
    /// Version negotiation always carries the zero version sentinel.
    pub fn from_supported(
        dest_id: ConnectionId,
        source_id: ConnectionId,
        supported: Vec<Version>,
    ) -> Self {
        Self::with_header(
            VERSION_NEGOTIATION_HEADER,
            Version::Negotiating,
            dest_id,
            source_id,
            VersionNegotiationPayload::new(supported),
        )
    }
}
