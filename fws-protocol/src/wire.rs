//! Fixed-width little-endian read/write primitives
//!
//! Reads are bounds-checked up front: running out of input produces
//! [`DecodeError::TruncatedFrame`] instead of a panic.

use bytes::{Buf, BufMut};

use crate::error::DecodeError;
use crate::types::{Attr, Cell, Color};

/// Encoded size of a [`Color`]
pub const COLOR_LEN: usize = 4;

/// Encoded size of a [`Cell`]: code point, fg, bg, attributes
pub const CELL_LEN: usize = 4 + COLOR_LEN + COLOR_LEN + 2;

/// Cursor over one frame's bytes
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    total: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            total: buf.len(),
        }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.total - self.buf.len()
    }

    /// Fail unless `n` more bytes are available
    pub fn ensure(&self, n: usize) -> Result<(), DecodeError> {
        if self.buf.remaining() >= n {
            return Ok(());
        }
        Err(DecodeError::TruncatedFrame {
            needed: self.position().saturating_add(n),
            available: self.total,
        })
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.ensure(2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.ensure(4)?;
        Ok(self.buf.get_i32_le())
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.ensure(8)?;
        Ok(self.buf.get_u64_le())
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.ensure(8)?;
        Ok(self.buf.get_i64_le())
    }

    pub fn read_color(&mut self) -> Result<Color, DecodeError> {
        self.ensure(COLOR_LEN)?;
        Ok(Color {
            a: self.buf.get_u8(),
            r: self.buf.get_u8(),
            g: self.buf.get_u8(),
            b: self.buf.get_u8(),
        })
    }

    pub fn read_cell(&mut self) -> Result<Cell, DecodeError> {
        self.ensure(CELL_LEN)?;
        let code_point = self.buf.get_u32_le();
        let ch = char::from_u32(code_point).ok_or(DecodeError::InvalidCodePoint(code_point))?;
        let fg = self.read_color()?;
        let bg = self.read_color()?;
        let attr = Attr::from_bits_retain(self.buf.get_u16_le());
        Ok(Cell { ch, fg, bg, attr })
    }
}

/// Append a color as `A, R, G, B`
pub fn put_color<B: BufMut>(dst: &mut B, color: Color) {
    dst.put_slice(&[color.a, color.r, color.g, color.b]);
}

/// Append a cell in its 14-byte layout
pub fn put_cell<B: BufMut>(dst: &mut B, cell: &Cell) {
    dst.put_u32_le(u32::from(cell.ch));
    put_color(dst, cell.fg);
    put_color(dst, cell.bg);
    dst.put_u16_le(cell.attr.bits());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_byte_order() {
        let mut buf = Vec::new();
        put_color(&mut buf, Color::new(1, 2, 3, 4));
        assert_eq!(buf, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_cell_layout() {
        let cell = Cell::new('A', Color::new(255, 1, 2, 3), Color::new(255, 4, 5, 6), Attr::BOLD);
        let mut buf = Vec::new();
        put_cell(&mut buf, &cell);
        assert_eq!(buf.len(), CELL_LEN);
        assert_eq!(
            buf,
            vec![0x41, 0, 0, 0, 255, 1, 2, 3, 255, 4, 5, 6, 0x00, 0x02]
        );

        let mut reader = WireReader::new(&buf);
        assert_eq!(reader.read_cell().unwrap(), cell);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_little_endian_integers() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 0x0403_0201);
        assert_eq!(reader.read_i64().unwrap(), -1);
        assert_eq!(reader.position(), 12);
    }

    #[test]
    fn test_short_color_is_truncated() {
        let mut reader = WireReader::new(&[1, 2, 3]);
        assert_eq!(
            reader.read_color(),
            Err(DecodeError::TruncatedFrame {
                needed: 4,
                available: 3
            })
        );
        // Nothing consumed on failure
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_short_cell_is_truncated() {
        let bytes = [0u8; CELL_LEN - 1];
        let mut reader = WireReader::new(&bytes);
        assert!(reader.read_cell().unwrap_err().is_truncation());
    }

    #[test]
    fn test_surrogate_code_point_rejected() {
        let mut buf = Vec::new();
        buf.put_u32_le(0xD800);
        buf.extend_from_slice(&[0; 10]);
        let mut reader = WireReader::new(&buf);
        assert_eq!(reader.read_cell(), Err(DecodeError::InvalidCodePoint(0xD800)));
    }

    #[test]
    fn test_out_of_range_code_point_rejected() {
        let mut buf = Vec::new();
        buf.put_u32_le(0x11_0000);
        buf.extend_from_slice(&[0; 10]);
        let mut reader = WireReader::new(&buf);
        assert_eq!(reader.read_cell(), Err(DecodeError::InvalidCodePoint(0x11_0000)));
    }

    #[test]
    fn test_attr_unknown_bits_survive() {
        let cell = Cell::new(' ', Color::TRANSPARENT, Color::TRANSPARENT, Attr::from_bits_retain(0x0003));
        let mut buf = Vec::new();
        put_cell(&mut buf, &cell);
        let decoded = WireReader::new(&buf).read_cell().unwrap();
        assert_eq!(decoded.attr.bits(), 0x0003);
    }
}
