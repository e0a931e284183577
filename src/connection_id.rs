//! QUIC connection identifiers
//!
//! Opaque endpoint-chosen identifiers, written length-prefixed in long
//! headers. Stored as shared [`Bytes`] handles so embedding an ID in a packet
//! detaches the packet's lifetime from the caller's buffer.

use std::fmt;

use bytes::{BufMut, Bytes};

/// QUIC version 1 caps connection IDs at 20 bytes, but version negotiation
/// packets from other versions may legitimately carry longer ones, so this
/// codec only enforces the one-byte length field. Version-specific validation
/// belongs to the transport layer.
pub const MAX_V1_CONNECTION_ID_LENGTH: usize = 20;

/// Opaque connection identifier, 0 to 255 bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId {
    data: Bytes,
}

impl ConnectionId {
    /// Take shared ownership of `data` as a connection ID.
    ///
    /// Panics if `data` does not fit the single-byte wire length field; that
    /// is a caller bug, not something a peer can trigger.
    pub fn new(data: Bytes) -> Self {
        assert!(data.len() < 256, "connection ID length {} exceeds wire limit", data.len());
        Self { data }
    }

    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write the one-byte length prefix followed by the ID bytes.
    pub(crate) fn write_to(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.data.len() as u8);
        buf.put_slice(&self.data);
    }
}

impl fmt::Debug for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionId({})", hex::encode(&self.data))
    }
}
