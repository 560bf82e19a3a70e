//! Request catalog, frame encoding and tag dispatch
//!
//! A frame is `[kind tag: u8][payload]`. Each kind has a fixed payload
//! layout (see [`MessageKind::fixed_payload_len`]); DRAW_FILL appends
//! `width * height` cells after its fixed prefix. Integers are
//! little-endian and fields appear in declaration order with no padding.

use std::fmt;

use bytes::BufMut;

use crate::error::DecodeError;
use crate::event::{Event, EVENT_LEN};
use crate::types::{Cell, CellGrid, WindowId};
use crate::wire::{put_cell, WireReader, CELL_LEN};

/// One-byte frame tag. Values are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    /// Client asks for a new window
    New = 0,
    /// Client asks for the cell at a window-local position
    Get = 1,
    /// Server reports the id of a created window
    ReplyCreation = 2,
    /// Server answers a GET
    ReplyGet = 3,
    /// Server delivers an input event to a window
    Event = 4,
    /// Set one cell
    Draw = 5,
    /// Set a rectangle of cells
    DrawFill = 6,
    /// Pending draws are complete and may be shown
    Render = 7,
    Resize = 8,
    Delete = 9,
    Move = 10,
    /// Raise and activate a window
    Focus = 11,
    /// Window is no longer active
    Unfocus = 12,
    /// Flow-control acknowledgment
    Ack = 13,
    /// Ask the peer to retransmit
    Repeat = 14,
}

impl MessageKind {
    /// Every kind, in tag order
    pub const ALL: [MessageKind; 15] = [
        MessageKind::New,
        MessageKind::Get,
        MessageKind::ReplyCreation,
        MessageKind::ReplyGet,
        MessageKind::Event,
        MessageKind::Draw,
        MessageKind::DrawFill,
        MessageKind::Render,
        MessageKind::Resize,
        MessageKind::Delete,
        MessageKind::Move,
        MessageKind::Focus,
        MessageKind::Unfocus,
        MessageKind::Ack,
        MessageKind::Repeat,
    ];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Payload bytes after the tag. For DRAW_FILL this is only the
    /// `id, width, height` prefix; the cells follow.
    pub const fn fixed_payload_len(self) -> usize {
        match self {
            MessageKind::New => 4 * 5,
            MessageKind::Get | MessageKind::Move | MessageKind::Resize => 4 + 8 + 8,
            MessageKind::ReplyGet => CELL_LEN,
            MessageKind::Event => 4 + EVENT_LEN,
            MessageKind::Draw => 4 + 8 + 8 + CELL_LEN,
            MessageKind::DrawFill => 4 + 8 + 8,
            MessageKind::ReplyCreation
            | MessageKind::Render
            | MessageKind::Delete
            | MessageKind::Focus
            | MessageKind::Unfocus
            | MessageKind::Ack
            | MessageKind::Repeat => 4,
        }
    }

    /// Wire name, as used in logs
    pub const fn name(self) -> &'static str {
        match self {
            MessageKind::New => "NEW",
            MessageKind::Get => "GET",
            MessageKind::ReplyCreation => "REPLY_CREATION",
            MessageKind::ReplyGet => "REPLY_GET",
            MessageKind::Event => "EVENT",
            MessageKind::Draw => "DRAW",
            MessageKind::DrawFill => "DRAW_FILL",
            MessageKind::Render => "RENDER",
            MessageKind::Resize => "RESIZE",
            MessageKind::Delete => "DELETE",
            MessageKind::Move => "MOVE",
            MessageKind::Focus => "FOCUS",
            MessageKind::Unfocus => "UNFOCUS",
            MessageKind::Ack => "ACK",
            MessageKind::Repeat => "REPEAT",
        }
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = DecodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(DecodeError::UnknownKind(tag))
    }
}

impl From<MessageKind> for u8 {
    fn from(kind: MessageKind) -> Self {
        kind.as_u8()
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded frame
///
/// Coordinates are signed 64-bit on the wire except in `NewWindow`, whose
/// fields are all 32-bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Window creation request
    NewWindow {
        /// Unix pid of the requesting application
        pid: u32,
        /// Global position
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Query the cell at a window-local position
    Get { id: WindowId, x: i64, y: i64 },

    /// Id assigned to a newly created window
    ReplyCreation { id: WindowId },

    /// Answer to [`Request::Get`]
    ReplyGet { cell: Cell },

    /// Input event for a window, with window-local mouse coordinates
    Event { id: WindowId, event: Event },

    /// Set one cell
    Draw {
        id: WindowId,
        x: i64,
        y: i64,
        cell: Cell,
    },

    /// Set a `width x height` block of cells
    DrawFill { id: WindowId, grid: CellGrid },

    /// Commit pending draws for display
    Render { id: WindowId },

    Resize {
        id: WindowId,
        width: u64,
        height: u64,
    },

    Delete { id: WindowId },

    /// Reposition a window
    Move { id: WindowId, x: i64, y: i64 },

    Focus { id: WindowId },

    Unfocus { id: WindowId },

    Ack { id: WindowId },

    Repeat { id: WindowId },
}

impl Request {
    pub fn kind(&self) -> MessageKind {
        match self {
            Request::NewWindow { .. } => MessageKind::New,
            Request::Get { .. } => MessageKind::Get,
            Request::ReplyCreation { .. } => MessageKind::ReplyCreation,
            Request::ReplyGet { .. } => MessageKind::ReplyGet,
            Request::Event { .. } => MessageKind::Event,
            Request::Draw { .. } => MessageKind::Draw,
            Request::DrawFill { .. } => MessageKind::DrawFill,
            Request::Render { .. } => MessageKind::Render,
            Request::Resize { .. } => MessageKind::Resize,
            Request::Delete { .. } => MessageKind::Delete,
            Request::Move { .. } => MessageKind::Move,
            Request::Focus { .. } => MessageKind::Focus,
            Request::Unfocus { .. } => MessageKind::Unfocus,
            Request::Ack { .. } => MessageKind::Ack,
            Request::Repeat { .. } => MessageKind::Repeat,
        }
    }

    /// Window the request refers to; `None` for NEW and REPLY_GET
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            Request::NewWindow { .. } | Request::ReplyGet { .. } => None,
            Request::Get { id, .. }
            | Request::ReplyCreation { id }
            | Request::Event { id, .. }
            | Request::Draw { id, .. }
            | Request::DrawFill { id, .. }
            | Request::Render { id }
            | Request::Resize { id, .. }
            | Request::Delete { id }
            | Request::Move { id, .. }
            | Request::Focus { id }
            | Request::Unfocus { id }
            | Request::Ack { id }
            | Request::Repeat { id } => Some(*id),
        }
    }

    /// Size of the encoded frame, tag included
    pub fn encoded_len(&self) -> usize {
        let cells = match self {
            Request::DrawFill { grid, .. } => grid.len() * CELL_LEN,
            _ => 0,
        };
        1 + self.kind().fixed_payload_len() + cells
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }

    /// Append the encoded frame to `dst`
    pub fn encode_into<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(self.kind().as_u8());
        match self {
            Request::NewWindow {
                pid,
                x,
                y,
                width,
                height,
            } => {
                dst.put_u32_le(*pid);
                dst.put_i32_le(*x);
                dst.put_i32_le(*y);
                dst.put_u32_le(*width);
                dst.put_u32_le(*height);
            }
            Request::Get { id, x, y } | Request::Move { id, x, y } => {
                dst.put_u32_le(id.0);
                dst.put_i64_le(*x);
                dst.put_i64_le(*y);
            }
            Request::ReplyGet { cell } => put_cell(dst, cell),
            Request::Event { id, event } => {
                dst.put_u32_le(id.0);
                event.encode_into(dst);
            }
            Request::Draw { id, x, y, cell } => {
                dst.put_u32_le(id.0);
                dst.put_i64_le(*x);
                dst.put_i64_le(*y);
                put_cell(dst, cell);
            }
            Request::DrawFill { id, grid } => {
                dst.put_u32_le(id.0);
                dst.put_u64_le(grid.width() as u64);
                dst.put_u64_le(grid.height() as u64);
                for cell in grid {
                    put_cell(dst, cell);
                }
            }
            Request::Resize { id, width, height } => {
                dst.put_u32_le(id.0);
                dst.put_u64_le(*width);
                dst.put_u64_le(*height);
            }
            Request::ReplyCreation { id }
            | Request::Render { id }
            | Request::Delete { id }
            | Request::Focus { id }
            | Request::Unfocus { id }
            | Request::Ack { id }
            | Request::Repeat { id } => dst.put_u32_le(id.0),
        }
    }

    /// Decode exactly one frame; leftover bytes are an error
    pub fn decode(frame: &[u8]) -> Result<Request, DecodeError> {
        let (request, consumed) = Self::decode_prefix(frame)?;
        let extra = frame.len() - consumed;
        if extra > 0 {
            let err = DecodeError::TrailingBytes {
                kind: request.kind(),
                extra,
            };
            tracing::trace!("Rejecting frame: {}", err);
            return Err(err);
        }
        Ok(request)
    }

    /// Decode one frame from the front of `buf`
    ///
    /// Returns the request and the number of bytes it occupied; anything
    /// after that is left to the caller.
    pub fn decode_prefix(buf: &[u8]) -> Result<(Request, usize), DecodeError> {
        let mut reader = WireReader::new(buf);
        match decode_body(&mut reader) {
            Ok(request) => Ok((request, reader.position())),
            Err(e) => {
                tracing::trace!(
                    "Failed to decode frame (tag {:?}, {} bytes): {}",
                    buf.first(),
                    buf.len(),
                    e
                );
                Err(e)
            }
        }
    }
}

fn decode_body(reader: &mut WireReader<'_>) -> Result<Request, DecodeError> {
    let kind = MessageKind::try_from(reader.read_u8()?)?;
    reader.ensure(kind.fixed_payload_len())?;

    let request = match kind {
        MessageKind::New => Request::NewWindow {
            pid: reader.read_u32()?,
            x: reader.read_i32()?,
            y: reader.read_i32()?,
            width: reader.read_u32()?,
            height: reader.read_u32()?,
        },
        MessageKind::Get => Request::Get {
            id: read_id(reader)?,
            x: reader.read_i64()?,
            y: reader.read_i64()?,
        },
        MessageKind::ReplyCreation => Request::ReplyCreation {
            id: read_id(reader)?,
        },
        MessageKind::ReplyGet => Request::ReplyGet {
            cell: reader.read_cell()?,
        },
        MessageKind::Event => Request::Event {
            id: read_id(reader)?,
            event: Event::decode(reader)?,
        },
        MessageKind::Draw => Request::Draw {
            id: read_id(reader)?,
            x: reader.read_i64()?,
            y: reader.read_i64()?,
            cell: reader.read_cell()?,
        },
        MessageKind::DrawFill => decode_draw_fill(reader)?,
        MessageKind::Render => Request::Render {
            id: read_id(reader)?,
        },
        MessageKind::Resize => Request::Resize {
            id: read_id(reader)?,
            width: reader.read_u64()?,
            height: reader.read_u64()?,
        },
        MessageKind::Delete => Request::Delete {
            id: read_id(reader)?,
        },
        MessageKind::Move => Request::Move {
            id: read_id(reader)?,
            x: reader.read_i64()?,
            y: reader.read_i64()?,
        },
        MessageKind::Focus => Request::Focus {
            id: read_id(reader)?,
        },
        MessageKind::Unfocus => Request::Unfocus {
            id: read_id(reader)?,
        },
        MessageKind::Ack => Request::Ack {
            id: read_id(reader)?,
        },
        MessageKind::Repeat => Request::Repeat {
            id: read_id(reader)?,
        },
    };

    Ok(request)
}

fn read_id(reader: &mut WireReader<'_>) -> Result<WindowId, DecodeError> {
    reader.read_u32().map(WindowId)
}

fn decode_draw_fill(reader: &mut WireReader<'_>) -> Result<Request, DecodeError> {
    let id = read_id(reader)?;
    let width = reader.read_u64()?;
    let height = reader.read_u64()?;
    let too_large = || DecodeError::GridTooLarge { width, height };

    let (w, h) = match (usize::try_from(width), usize::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(too_large()),
    };
    let count = w.checked_mul(h).ok_or_else(too_large)?;
    let bitmap_len = count.checked_mul(CELL_LEN).ok_or_else(too_large)?;

    // Verify the whole bitmap is present before allocating for it
    reader.ensure(bitmap_len)?;

    let mut cells = Vec::with_capacity(count);
    for _ in 0..count {
        cells.push(reader.read_cell()?);
    }
    let grid = CellGrid::from_cells(w, h, cells).ok_or_else(too_large)?;

    Ok(Request::DrawFill { id, grid })
}
