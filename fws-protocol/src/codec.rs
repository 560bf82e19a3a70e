//! Length-prefixed framing for stream sockets
//!
//! Frames carry no length of their own, so on a byte stream each one is
//! preceded by its size as a little-endian `u32`.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::DecodeError;
use crate::messages::Request;

/// Default maximum frame size (16 MB)
pub const DEFAULT_MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

const LENGTH_PREFIX: usize = 4;

/// Stream codec error
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },
}

/// Codec for [`Request`] frames in both directions
///
/// Client and server speak the same frame format, so one codec serves
/// both ends of the socket.
#[derive(Debug, Clone)]
pub struct FrameCodec {
    max_frame_size: usize,
}

impl FrameCodec {
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self { max_frame_size }
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    fn check_size(&self, size: usize) -> Result<(), CodecError> {
        if size > self.max_frame_size {
            return Err(CodecError::FrameTooLarge {
                size,
                max: self.max_frame_size,
            });
        }
        Ok(())
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = Request;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Need at least 4 bytes for length prefix
        if src.len() < LENGTH_PREFIX {
            return Ok(None);
        }

        // Peek at length without consuming
        let len = u32::from_le_bytes([src[0], src[1], src[2], src[3]]) as usize;
        self.check_size(len)?;

        if src.len() < LENGTH_PREFIX + len {
            src.reserve(LENGTH_PREFIX + len - src.len());
            return Ok(None);
        }

        src.advance(LENGTH_PREFIX);
        let frame = src.split_to(len);

        let request = Request::decode(&frame)?;
        tracing::trace!("Decoded {} frame ({} bytes)", request.kind(), len);
        Ok(Some(request))
    }
}

impl Encoder<&Request> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &Request, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let len = item.encoded_len();
        self.check_size(len)?;
        // Also bounded by the u32 prefix
        let prefix = u32::try_from(len).map_err(|_| CodecError::FrameTooLarge {
            size: len,
            max: u32::MAX as usize,
        })?;

        dst.reserve(LENGTH_PREFIX + len);
        dst.put_u32_le(prefix);
        item.encode_into(dst);
        Ok(())
    }
}

impl Encoder<Request> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Request, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&Request>>::encode(self, &item, dst)
    }
}
