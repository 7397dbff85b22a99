//! Quadrilateral geometry: bilinear interpolation, size estimation and validation.

use crate::{
    foundation::core::{BezPath, Canvas, Point, Rect, Size},
    foundation::error::{BillboardError, BillboardResult},
    foundation::json_num::whole_point,
    foundation::math::{distance, lerp_point, turn},
};

const AREA_EPSILON: f64 = 1e-6;

/// One of the four named corners of a [`Quad`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl Corner {
    /// All corners in hit-test priority order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

/// Destination shape for compositing: four named corners in surface pixel space.
///
/// The corners are expected to trace a simple polygon in the order TL→TR→BR→BL.
/// Nothing is enforced at construction; [`Quad::validate`] is the gate the compositor uses.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quad {
    /// Top-left corner.
    #[serde(serialize_with = "whole_point")]
    pub top_left: Point,
    /// Top-right corner.
    #[serde(serialize_with = "whole_point")]
    pub top_right: Point,
    /// Bottom-left corner.
    #[serde(serialize_with = "whole_point")]
    pub bottom_left: Point,
    /// Bottom-right corner.
    #[serde(serialize_with = "whole_point")]
    pub bottom_right: Point,
}

impl Quad {
    /// Build a quad from its four corners.
    pub fn new(top_left: Point, top_right: Point, bottom_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Axis-aligned quad whose corners are the corners of `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        )
    }

    /// Centered rectangle of `size` inside `canvas`.
    pub fn centered(canvas: Canvas, size: Size) -> Self {
        let c = canvas.rect().center();
        Self::from_rect(Rect::from_center_size(c, size))
    }

    /// Corner position by name.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        }
    }

    /// Mutable corner position by name.
    pub fn corner_mut(&mut self, corner: Corner) -> &mut Point {
        match corner {
            Corner::TopLeft => &mut self.top_left,
            Corner::TopRight => &mut self.top_right,
            Corner::BottomLeft => &mut self.bottom_left,
            Corner::BottomRight => &mut self.bottom_right,
        }
    }

    /// Corners in outline order TL→TR→BR→BL.
    pub fn outline(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Apply `f` to every corner.
    pub fn map(self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self::new(
            f(self.top_left),
            f(self.top_right),
            f(self.bottom_left),
            f(self.bottom_right),
        )
    }

    /// Point at normalized `(u, v)` by bilinear interpolation.
    ///
    /// `u` runs along the top and bottom edges, `v` blends from the top edge to the bottom
    /// edge. Exact for parallelograms; an approximation of the projective mapping otherwise.
    pub fn interpolate(&self, u: f64, v: f64) -> Point {
        let top = lerp_point(self.top_left, self.top_right, u);
        let bottom = lerp_point(self.bottom_left, self.bottom_right, u);
        lerp_point(top, bottom, v)
    }

    /// Approximate rectangular size: mean of opposite edge lengths.
    pub fn estimate_size(&self) -> Size {
        let width = (distance(self.top_left, self.top_right)
            + distance(self.bottom_left, self.bottom_right))
            / 2.0;
        let height = (distance(self.top_left, self.bottom_left)
            + distance(self.top_right, self.bottom_right))
            / 2.0;
        Size::new(width, height)
    }

    /// Axis-aligned bounds over all four corners.
    pub fn bounding_box(&self) -> Rect {
        let [a, b, c, d] = self.outline();
        Rect::from_points(a, b).union_pt(c).union_pt(d)
    }

    /// Signed shoelace area of the outline (positive when clockwise on a y-down screen).
    pub fn signed_area(&self) -> f64 {
        let pts = self.outline();
        let mut acc = 0.0;
        for i in 0..4 {
            let a = pts[i];
            let b = pts[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc / 2.0
    }

    /// Closed outline path TL→TR→BR→BL, used for clipping and guide strokes.
    pub fn to_path(&self) -> BezPath {
        let [a, b, c, d] = self.outline();
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        path.line_to(c);
        path.line_to(d);
        path.close_path();
        path
    }

    /// Clamp every corner independently to `[margin, dim - margin]` of `canvas`.
    pub fn clamp_to(self, canvas: Canvas, margin: f64) -> Self {
        self.map(|p| canvas.clamp_point(p, margin))
    }

    /// Round every coordinate to the nearest integer.
    pub fn round(self) -> Self {
        self.map(|p| p.round())
    }

    /// Reject quads the tile compositor cannot render meaningfully.
    ///
    /// Fails with [`BillboardError::DegenerateQuad`] for non-finite coordinates, zero area,
    /// and self-intersecting or concave outlines. Collinear neighbours are tolerated.
    pub fn validate(&self) -> BillboardResult<()> {
        let pts = self.outline();
        if pts.iter().any(|p| !p.is_finite()) {
            return Err(BillboardError::degenerate_quad("non-finite corner"));
        }
        if self.signed_area().abs() <= AREA_EPSILON {
            return Err(BillboardError::degenerate_quad("zero-area quad"));
        }

        let mut positive = false;
        let mut negative = false;
        for i in 0..4 {
            let t = turn(pts[i], pts[(i + 1) % 4], pts[(i + 2) % 4]);
            positive |= t > AREA_EPSILON;
            negative |= t < -AREA_EPSILON;
        }
        if positive && negative {
            return Err(BillboardError::degenerate_quad(
                "quad is self-intersecting or concave",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/quad.rs"]
mod tests;
