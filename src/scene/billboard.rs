use std::fmt;

use crate::{
    foundation::core::{Canvas, Rect, Size},
    geometry::quad::Quad,
};

const DEFAULT_MAX_SIZE: Size = Size::new(300.0, 400.0);
const DEFAULT_CANVAS_FRACTION: Size = Size::new(0.4, 0.5);
const DEFAULT_MARGIN: f64 = 10.0;

/// Stable billboard identifier, numeric or textual as found in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum BillboardId {
    /// Numeric id.
    Number(u64),
    /// Textual id.
    Text(String),
}

impl fmt::Display for BillboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for BillboardId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for BillboardId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// A region of the screenshot that receives a banner.
///
/// `bounds` mirrors the quad's axis-aligned bounding box and is refreshed by
/// [`Billboard::commit`]; `rotation` is opaque metadata carried for the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Billboard {
    /// Stable identifier.
    pub id: BillboardId,
    /// Destination quad.
    pub perspective: Quad,
    /// Axis-aligned bounds of `perspective`.
    pub bounds: Rect,
    /// Carried through unchanged; never used for rendering.
    pub rotation: f64,
}

impl Billboard {
    /// Billboard covering `perspective`, with bounds derived from it.
    pub fn new(id: impl Into<BillboardId>, perspective: Quad) -> Self {
        Self {
            id: id.into(),
            perspective,
            bounds: perspective.bounding_box(),
            rotation: 0.0,
        }
    }

    /// Billboard with the default centred quad for `canvas`.
    pub fn with_default_quad(id: impl Into<BillboardId>, canvas: Canvas) -> Self {
        Self::new(id, default_quad(canvas))
    }

    /// Replace the quad and resynchronize the bounding box.
    pub fn commit(&mut self, quad: Quad) {
        self.perspective = quad;
        self.bounds = quad.bounding_box();
    }
}

/// Centred rectangle of `min(300, 0.4·w) × min(400, 0.5·h)`, kept 10 px inside the canvas.
pub fn default_quad(canvas: Canvas) -> Quad {
    let c = canvas.size();
    let size = Size::new(
        DEFAULT_MAX_SIZE
            .width
            .min(c.width * DEFAULT_CANVAS_FRACTION.width),
        DEFAULT_MAX_SIZE
            .height
            .min(c.height * DEFAULT_CANVAS_FRACTION.height),
    );
    Quad::centered(canvas, size).clamp_to(canvas, DEFAULT_MARGIN)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/billboard.rs"]
mod tests;
