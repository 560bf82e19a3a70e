//! Terminal input events carried by EVENT frames
//!
//! A field-for-field record of the terminal's input event. The codec
//! round-trips every field as-is and never validates contents: an unknown
//! event type, stray modifier bits or a non-scalar `ch` all survive.

use std::fmt;

use bytes::BufMut;

use crate::error::DecodeError;
use crate::wire::WireReader;

/// Encoded size of an [`Event`]
pub const EVENT_LEN: usize = 1 + 1 + 2 + 4 + 8 * 5;

/// Event discriminator byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventType(pub u8);

impl EventType {
    pub const KEY: EventType = EventType(0);
    pub const RESIZE: EventType = EventType(1);
    pub const MOUSE: EventType = EventType(2);
    pub const ERROR: EventType = EventType(3);
    pub const INTERRUPT: EventType = EventType(4);
    pub const RAW: EventType = EventType(5);
    pub const NONE: EventType = EventType(6);

    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::KEY => "key",
            Self::RESIZE => "resize",
            Self::MOUSE => "mouse",
            Self::ERROR => "error",
            Self::INTERRUPT => "interrupt",
            Self::RAW => "raw",
            Self::NONE => "none",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type({})", self.0),
        }
    }
}

bitflags::bitflags! {
    /// Key/mouse modifier bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifier: u8 {
        const ALT    = 1 << 0;
        const MOTION = 1 << 1;
    }
}

/// Raw terminal key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Key(pub u16);

/// Input event delivered to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Event {
    pub event_type: EventType,
    pub modifier: Modifier,
    pub key: Key,
    /// Character for key events, kept as the raw 32-bit value
    pub ch: u32,
    /// Terminal width, on resize events
    pub width: i64,
    /// Terminal height, on resize events
    pub height: i64,
    pub mouse_x: i64,
    pub mouse_y: i64,
    /// Generic counter (e.g. bytes for raw events)
    pub n: i64,
}

impl Event {
    /// Key press, either a special `key` or a character `ch`
    pub fn key(modifier: Modifier, key: Key, ch: char) -> Self {
        Self {
            event_type: EventType::KEY,
            modifier,
            key,
            ch: u32::from(ch),
            ..Self::default()
        }
    }

    pub fn resize(width: i64, height: i64) -> Self {
        Self {
            event_type: EventType::RESIZE,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn mouse(key: Key, mouse_x: i64, mouse_y: i64) -> Self {
        Self {
            event_type: EventType::MOUSE,
            key,
            mouse_x,
            mouse_y,
            ..Self::default()
        }
    }

    /// The character as a Unicode scalar, if it is one
    pub fn char(&self) -> Option<char> {
        char::from_u32(self.ch)
    }

    pub fn encode_into<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(self.event_type.0);
        dst.put_u8(self.modifier.bits());
        dst.put_u16_le(self.key.0);
        dst.put_u32_le(self.ch);
        dst.put_i64_le(self.width);
        dst.put_i64_le(self.height);
        dst.put_i64_le(self.mouse_x);
        dst.put_i64_le(self.mouse_y);
        dst.put_i64_le(self.n);
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        reader.ensure(EVENT_LEN)?;
        Ok(Self {
            event_type: EventType(reader.read_u8()?),
            modifier: Modifier::from_bits_retain(reader.read_u8()?),
            key: Key(reader.read_u16()?),
            ch: reader.read_u32()?,
            width: reader.read_i64()?,
            height: reader.read_i64()?,
            mouse_x: reader.read_i64()?,
            mouse_y: reader.read_i64()?,
            n: reader.read_i64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(event: &Event) -> Event {
        let mut buf = Vec::new();
        event.encode_into(&mut buf);
        assert_eq!(buf.len(), EVENT_LEN);
        let mut reader = WireReader::new(&buf);
        let decoded = Event::decode(&mut reader).unwrap();
        assert_eq!(reader.remaining(), 0);
        decoded
    }

    #[test]
    fn test_event_len() {
        assert_eq!(EVENT_LEN, 40);
    }

    #[test]
    fn test_key_event_layout() {
        let event = Event::key(Modifier::ALT, Key(0xFFFF - 19), 'q');
        let mut buf = Vec::new();
        event.encode_into(&mut buf);

        assert_eq!(buf[0], 0);
        assert_eq!(buf[1], 1);
        assert_eq!(&buf[2..4], &[0xEC, 0xFF]);
        assert_eq!(&buf[4..8], &[b'q', 0, 0, 0]);
        assert!(buf[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_resize_event_roundtrip() {
        let event = Event::resize(80, 24);
        assert_eq!(roundtrip(&event), event);
    }

    #[test]
    fn test_extreme_values_roundtrip() {
        let event = Event {
            event_type: EventType(0xff),
            modifier: Modifier::from_bits_retain(0xff),
            key: Key(u16::MAX),
            ch: u32::MAX,
            width: i64::MAX,
            height: i64::MIN,
            mouse_x: -1,
            mouse_y: 0,
            n: i64::MIN + 1,
        };
        let decoded = roundtrip(&event);
        assert_eq!(decoded, event);
        assert!(decoded.char().is_none());
        assert_eq!(decoded.event_type.to_string(), "type(255)");
    }

    #[test]
    fn test_truncated_event() {
        let buf = [0u8; EVENT_LEN - 1];
        let mut reader = WireReader::new(&buf);
        assert_eq!(
            Event::decode(&mut reader),
            Err(DecodeError::TruncatedFrame {
                needed: EVENT_LEN,
                available: EVENT_LEN - 1
            })
        );
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(EventType::MOUSE.to_string(), "mouse");
        assert_eq!(EventType::NONE.name(), Some("none"));
    }
}
