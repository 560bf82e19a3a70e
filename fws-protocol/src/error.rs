//! Frame decoding errors

use crate::messages::MessageKind;

/// Why a frame could not be decoded
///
/// Decoding either yields a complete [`Request`](crate::Request) or one of
/// these; a partially decoded request is never returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Truncated frame: need {needed} bytes, have {available}")]
    TruncatedFrame { needed: usize, available: usize },

    #[error("Unknown message kind tag: {0:#04x}")]
    UnknownKind(u8),

    #[error("Invalid Unicode scalar value: {0:#x}")]
    InvalidCodePoint(u32),

    #[error("DRAW_FILL image of {width}x{height} cells is not addressable")]
    GridTooLarge { width: u64, height: u64 },

    #[error("{extra} trailing bytes after {kind} frame")]
    TrailingBytes { kind: MessageKind, extra: usize },
}

impl DecodeError {
    /// Whether more bytes could turn this failure into a success
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedFrame { .. })
    }
}
