//! Wire codec error types

use thiserror::Error;

/// Errors produced while decoding peer-supplied bytes.
///
/// Malformed peer data is an expected, frequent condition on a network
/// boundary, so every decode path reports it through this type and never
/// panics. Receiving one of these means the peer violated the protocol and
/// the connection should be closed. Encode-side preconditions (varint
/// magnitude, connection ID length) are caller contracts and assert instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WireError {
    /// The buffer ran out before a complete field could be read.
    #[error("buffer exhausted mid-decode")]
    UnexpectedEnd,

    /// An ACK range computation produced a bound below packet number 0.
    #[error("invalid ACK range: {0}")]
    InvalidAckRange(&'static str),

    /// The frame type varint named a frame this codec does not handle.
    #[error("unknown frame type {0:#x}")]
    UnknownFrameType(u64),
}

pub type WireResult<T> = Result<T, WireError>;
