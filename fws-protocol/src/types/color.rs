//! Straight-alpha ARGB colors and the source-over operator

use std::fmt;

/// ARGB cell color with straight (non-premultiplied) alpha
///
/// Encoded on the wire as 4 bytes in `A, R, G, B` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Opacity: 0 is fully transparent, 255 fully opaque
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Fully transparent black, also the result of compositing two
    /// fully transparent colors
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color from terminal RGB components
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Porter-Duff "source over": composite `self` on top of `bottom`
    ///
    /// With `at = top.a / 255`, `ab = bottom.a / 255` and
    /// `a0 = at + ab * (1 - at)`, every color channel becomes
    /// `round((top_c * at + bottom_c * (1 - at) * ab) / a0)` and the
    /// resulting alpha is `round(a0 * 255)`. Evaluated in integers scaled
    /// by `255^2`, so halves round up exactly.
    ///
    /// Not commutative. Two fully transparent inputs yield
    /// [`Color::TRANSPARENT`].
    pub fn over(self, bottom: Color) -> Color {
        if self.is_transparent() && bottom.is_transparent() {
            return Color::TRANSPARENT;
        }

        let alpha_top = u32::from(self.a);
        let alpha_bottom = u32::from(bottom.a);
        let weight_bottom = alpha_bottom * (255 - alpha_top);
        // a0 * 255^2, never zero once one side has coverage
        let coverage = alpha_top * 255 + weight_bottom;

        let blend = |top: u8, under: u8| -> u8 {
            let mixed = u32::from(top) * alpha_top * 255 + u32::from(under) * weight_bottom;
            rounded_div(mixed, coverage)
        };

        Color {
            a: rounded_div(coverage, 255),
            r: blend(self.r, bottom.r),
            g: blend(self.g, bottom.g),
            b: blend(self.b, bottom.b),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

/// `round(num / den)` for a quotient known to lie in `0..=255`
fn rounded_div(num: u32, den: u32) -> u8 {
    let quotient = (2 * num + den) / (2 * den);
    u8::try_from(quotient).unwrap_or(u8::MAX)
}
