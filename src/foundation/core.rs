pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Pixel dimensions of a destination surface (the screenshot canvas).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas of `width × height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size in floating-point pixels.
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Full canvas area anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size())
    }

    /// Clamp each coordinate independently to `[margin, dim - margin]`.
    ///
    /// If the canvas is smaller than twice the margin the range collapses to its midpoint.
    pub fn clamp_point(self, p: Point, margin: f64) -> Point {
        fn clamp_axis(v: f64, dim: f64, margin: f64) -> f64 {
            let lo = margin;
            let hi = dim - margin;
            if hi < lo {
                return dim / 2.0;
            }
            v.clamp(lo, hi)
        }

        let size = self.size();
        Point::new(
            clamp_axis(p.x, size.width, margin),
            clamp_axis(p.y, size.height, margin),
        )
    }
}

/// Straight (non-premultiplied) RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Colour from straight channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul_array(self) -> [u8; 4] {
        use crate::foundation::math::mul_div255_u8;

        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
