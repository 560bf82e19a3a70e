//! fws-protocol: wire protocol for the fws terminal window system
//!
//! Clients create windows, draw cells into them and receive input events
//! from the server over a local socket. This crate defines every frame
//! exchanged on that socket, its exact byte layout, and the alpha
//! compositing used when one window's cells are drawn over another's.
//!
//! Encoding, decoding and compositing are pure functions with no shared
//! state and may be called from any number of tasks concurrently.

pub mod codec;
pub mod error;
pub mod event;
pub mod messages;
pub mod types;
pub mod wire;

// Re-export main types at crate root
pub use codec::{CodecError, FrameCodec, DEFAULT_MAX_FRAME_SIZE};
pub use error::DecodeError;
pub use event::{Event, EventType, Key, Modifier, EVENT_LEN};
pub use messages::{MessageKind, Request};
pub use types::{Attr, Cell, CellGrid, Color, WindowId};
pub use wire::{CELL_LEN, COLOR_LEN};

/// Well-known server socket path
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/fws_server.sock";
