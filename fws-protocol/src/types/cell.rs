//! Terminal cells, text attributes and cell-level compositing

use super::Color;

bitflags::bitflags! {
    /// Text rendering attributes, encoded as a 16-bit little-endian value.
    ///
    /// Flags start at bit 9: the low bits are reserved for the terminal
    /// attribute space the renderer ORs these into.
    ///
    /// ```
    /// use fws_protocol::Attr;
    ///
    /// let style = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(style.contains(Attr::BOLD));
    /// assert_eq!(style.bits(), 0x2200);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u16 {
        const BOLD      = 1 << 9;
        const BLINK     = 1 << 10;
        const HIDDEN    = 1 << 11;
        const DIM       = 1 << 12;
        const UNDERLINE = 1 << 13;
        const CURSIVE   = 1 << 14;
        const REVERSE   = 1 << 15;
    }
}

/// One character position: glyph, colors and attributes
///
/// Encoded on the wire as 14 bytes: code point (4), fg (4), bg (4), attr (2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub attr: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Color::TRANSPARENT)
    }
}

impl Cell {
    pub const fn new(ch: char, fg: Color, bg: Color, attr: Attr) -> Self {
        Self { ch, fg, bg, attr }
    }

    /// A space with the given background and no attributes
    pub const fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::TRANSPARENT,
            bg,
            attr: Attr::empty(),
        }
    }

    /// A space over a background that is not fully opaque.
    ///
    /// When composited, a hole lets the glyph below show through, tinted
    /// by the hole's background.
    pub const fn is_hole(&self) -> bool {
        self.ch == ' ' && !self.bg.is_opaque()
    }

    /// Composite `self` on top of `bottom`
    ///
    /// Backgrounds are blended with [`Color::over`]. A hole inherits the
    /// bottom glyph and the bottom foreground under its own background;
    /// any other cell keeps its glyph and foreground. Attributes always
    /// come from the top cell.
    pub fn over(self, bottom: Cell) -> Cell {
        let (ch, fg) = if self.is_hole() {
            (bottom.ch, self.bg.over(bottom.fg))
        } else {
            (self.ch, self.fg)
        };

        Cell {
            ch,
            fg,
            bg: self.bg.over(bottom.bg),
            attr: self.attr,
        }
    }
}
