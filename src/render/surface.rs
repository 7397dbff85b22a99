//! The drawing-surface contract the compositor and editor overlays draw through.

use crate::{
    assets::raster::RasterImage,
    foundation::core::{Affine, BezPath, Canvas, Rect, Rgba8, Vec2},
    foundation::error::BillboardResult,
    render::FrameRGBA,
};

/// Stroke parameters for guide outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width in user units.
    pub width: f64,
    /// Stroke colour.
    pub color: Rgba8,
    /// Optional `[dash, gap]` pattern.
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    /// Solid stroke.
    pub fn solid(width: f64, color: Rgba8) -> Self {
        Self {
            width,
            color,
            dash: None,
        }
    }

    /// Dashed stroke with a `[dash, gap]` pattern.
    pub fn dashed(width: f64, color: Rgba8, dash: [f64; 2]) -> Self {
        Self {
            width,
            color,
            dash: Some(dash),
        }
    }
}

/// A 2D raster target that can only blit axis-aligned (optionally transformed) rectangles.
///
/// Semantics follow a canvas-style immediate-mode API: the current transform applies to
/// every subsequent draw and clip, and [`save`](Self::save) / [`restore`](Self::restore)
/// bracket both the transform and any clips pushed in between.
pub trait DrawingSurface {
    /// Backend-specific handle for an image that has been uploaded once and blitted often.
    type Image: Clone;

    /// Pixel size of the surface.
    fn canvas(&self) -> Canvas;

    /// Drop all content and reset transform/clip state.
    fn clear(&mut self);

    /// Make a raster drawable on this surface.
    fn upload(&mut self, image: &RasterImage) -> BillboardResult<Self::Image>;

    /// Draw the `src` sub-rectangle of `image` into `dst` under the current transform.
    fn draw_image(&mut self, image: &Self::Image, src: Rect, dst: Rect);

    /// Push the current transform and clip state.
    fn save(&mut self);

    /// Pop back to the state of the matching [`save`](Self::save); no-op when unbalanced.
    fn restore(&mut self);

    /// Current user-to-surface transform.
    fn transform(&self) -> Affine;

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Post-multiply a translation.
    fn translate(&mut self, offset: Vec2) {
        let t = self.transform() * Affine::translate(offset);
        self.set_transform(t);
    }

    /// Post-multiply a rotation (radians, clockwise on a y-down surface).
    fn rotate(&mut self, radians: f64) {
        let t = self.transform() * Affine::rotate(radians);
        self.set_transform(t);
    }

    /// Post-multiply a non-uniform scale.
    fn scale(&mut self, sx: f64, sy: f64) {
        let t = self.transform() * Affine::scale_non_uniform(sx, sy);
        self.set_transform(t);
    }

    /// Intersect the clip with `path` (in current user space) until the next restore.
    fn clip_path(&mut self, path: &BezPath);

    /// Fill an axis-aligned rectangle (in current user space).
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// Fill a closed path.
    fn fill_path(&mut self, path: &BezPath, color: Rgba8);

    /// Stroke a path.
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle);

    /// Rasterize and read back the current contents.
    fn snapshot(&mut self) -> BillboardResult<FrameRGBA>;
}
