//! Wire-format codec for QUIC long header packets and ACK frames.
//!
//! This crate covers the bit-exact encode/decode layer of a QUIC-style
//! transport: variable-length integers, long header framing for Initial,
//! 0-RTT, Handshake, Retry and version negotiation packets, packet number
//! truncation, and the ACK frame range/gap codec with optional ECN counters.
//!
//! Header protection and payload encryption are assumed to have been removed
//! before bytes reach the decoders here; the connection state machine, loss
//! recovery and socket I/O live outside this crate. Every operation is a
//! synchronous transformation over caller-supplied [`bytes`] buffers.
//!
//! Decoders report malformed peer data through [`WireError`] and never
//! panic; encoders assert their documented caller contracts.

// Variable-length integer primitives
pub mod varint;

// Packet number truncation
pub mod packet_number;

// Connection identifiers
pub mod connection_id;

// Version identifiers
pub mod version;

// Long header packet framing
pub mod packet;

// Frame codecs (ACK, PADDING, PING)
pub mod frame;

// Closed interval sets
pub mod ranges;

// Receive-side packet number accounting
pub mod space;

// Error taxonomy
pub mod error;

// Re-export main types
pub use connection_id::ConnectionId;
pub use error::{WireError, WireResult};
pub use frame::{AckFrame, EcnCounts, Frame, FrameType};
pub use packet::{
    HandshakePacket, InitialPacket, InitialPayload, LongHeaderPacket, NumberedPayload,
    PacketType, RetryPacket, RetryPayload, VersionNegotiationPacket, VersionNegotiationPayload,
    WirePayload, ZeroRttPacket,
};
pub use packet_number::PacketNumber;
pub use ranges::RangeSet;
pub use space::PacketNumberSpace;
pub use version::Version;

pub mod prelude {
    pub use crate::connection_id::ConnectionId;
    pub use crate::error::{WireError, WireResult};
    pub use crate::frame::{AckFrame, EcnCounts, Frame};
    pub use crate::packet::{
        HandshakePacket, InitialPacket, InitialPayload, NumberedPayload, RetryPacket,
        RetryPayload, VersionNegotiationPacket, ZeroRttPacket,
    };
    pub use crate::packet_number::PacketNumber;
    pub use crate::ranges::RangeSet;
    pub use crate::space::PacketNumberSpace;
    pub use crate::version::Version;
}
