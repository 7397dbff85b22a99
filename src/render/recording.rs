use crate::{
    assets::raster::RasterImage,
    foundation::core::{Affine, BezPath, Canvas, Rect, Rgba8},
    foundation::error::{BillboardError, BillboardResult},
    render::FrameRGBA,
    render::surface::{DrawingSurface, StrokeStyle},
};

/// One call observed by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    /// [`DrawingSurface::clear`].
    Clear,
    /// [`DrawingSurface::upload`] with the uploaded image dimensions.
    Upload {
        /// Uploaded image width.
        width: u32,
        /// Uploaded image height.
        height: u32,
    },
    /// [`DrawingSurface::draw_image`] with the transform in effect.
    DrawImage {
        /// Handle index returned by the matching upload.
        image: usize,
        /// Source rectangle in image pixels.
        src: Rect,
        /// Destination rectangle in user space.
        dst: Rect,
        /// Transform in effect at the time of the draw.
        transform: Affine,
    },
    /// [`DrawingSurface::save`].
    Save,
    /// [`DrawingSurface::restore`].
    Restore,
    /// [`DrawingSurface::clip_path`].
    Clip {
        /// Clip path in user space.
        path: BezPath,
        /// Transform in effect when the clip was pushed.
        transform: Affine,
    },
    /// [`DrawingSurface::fill_rect`].
    FillRect {
        /// Filled rectangle.
        rect: Rect,
        /// Fill colour.
        color: Rgba8,
    },
    /// [`DrawingSurface::fill_path`].
    FillPath {
        /// Filled path.
        path: BezPath,
        /// Fill colour.
        color: Rgba8,
    },
    /// [`DrawingSurface::stroke_path`].
    StrokePath {
        /// Stroked path.
        path: BezPath,
        /// Stroke style.
        style: StrokeStyle,
    },
}

/// A surface that records calls instead of rasterizing them.
///
/// Useful for asserting on the exact sequence of blits the compositor issues.
#[derive(Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    transform: Affine,
    stack: Vec<Affine>,
    uploads: usize,
    /// Calls in issue order (transform changes are folded into the draw records).
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    /// Empty recorder pretending to be a `canvas`-sized surface.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            uploads: 0,
            calls: Vec::new(),
        }
    }

    /// Number of recorded image blits.
    pub fn draw_image_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::DrawImage { .. }))
            .count()
    }

    /// Current save depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl DrawingSurface for RecordingSurface {
    type Image = usize;

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.transform = Affine::IDENTITY;
        self.stack.clear();
        self.calls.push(SurfaceCall::Clear);
    }

    fn upload(&mut self, image: &RasterImage) -> BillboardResult<Self::Image> {
        if image.width == 0 || image.height == 0 {
            return Err(BillboardError::invalid_image("image has zero size"));
        }
        let id = self.uploads;
        self.uploads += 1;
        self.calls.push(SurfaceCall::Upload {
            width: image.width,
            height: image.height,
        });
        Ok(id)
    }

    fn draw_image(&mut self, image: &Self::Image, src: Rect, dst: Rect) {
        self.calls.push(SurfaceCall::DrawImage {
            image: *image,
            src,
            dst,
            transform: self.transform,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
        self.calls.push(SurfaceCall::Save);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
        self.calls.push(SurfaceCall::Restore);
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn clip_path(&mut self, path: &BezPath) {
        self.calls.push(SurfaceCall::Clip {
            path: path.clone(),
            transform: self.transform,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.calls.push(SurfaceCall::FillRect { rect, color });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.calls.push(SurfaceCall::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        self.calls.push(SurfaceCall::StrokePath {
            path: path.clone(),
            style: *style,
        });
    }

    fn snapshot(&mut self) -> BillboardResult<FrameRGBA> {
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: vec![0; self.canvas.width as usize * self.canvas.height as usize * 4],
            premultiplied: true,
        })
    }
}
