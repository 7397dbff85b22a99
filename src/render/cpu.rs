use std::sync::Arc;

use crate::{
    assets::raster::RasterImage,
    foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8},
    foundation::error::{BillboardError, BillboardResult},
    render::FrameRGBA,
    render::surface::{DrawingSurface, StrokeStyle},
};

/// CPU drawing surface powered by `vello_cpu`.
///
/// Draw calls are recorded into a `vello_cpu::RenderContext` and rasterized on
/// [`snapshot`](DrawingSurface::snapshot). Pixels are premultiplied RGBA8.
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    state: SurfaceState,
    stack: Vec<SurfaceState>,
}

#[derive(Clone, Copy, Debug)]
struct SurfaceState {
    transform: Affine,
    // Clip layers pushed since the matching save.
    clip_layers: usize,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            clip_layers: 0,
        }
    }
}

impl CpuSurface {
    /// Allocate a transparent surface of `canvas` size.
    pub fn new(canvas: Canvas) -> BillboardResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| BillboardError::validation("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| BillboardError::validation("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(BillboardError::validation("surface must be at least 1x1"));
        }
        Ok(Self {
            canvas,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            state: SurfaceState::default(),
            stack: Vec::new(),
        })
    }

    fn open_clip_layers(&self) -> usize {
        self.state.clip_layers + self.stack.iter().map(|s| s.clip_layers).sum::<usize>()
    }
}

impl DrawingSurface for CpuSurface {
    type Image = vello_cpu::Image;

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ctx.reset();
        self.state = SurfaceState::default();
        self.stack.clear();
    }

    fn upload(&mut self, image: &RasterImage) -> BillboardResult<Self::Image> {
        let pixmap = image_premul_bytes_to_pixmap(
            image.rgba8_premul.as_slice(),
            image.width,
            image.height,
        )?;
        Ok(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        })
    }

    fn draw_image(&mut self, image: &Self::Image, src: Rect, dst: Rect) {
        if src.width() <= 0.0 || src.height() <= 0.0 || dst.width() <= 0.0 || dst.height() <= 0.0
        {
            return;
        }
        // Maps image pixel space onto `dst`, picking out `src`.
        let paint_transform = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height())
            * Affine::translate((-src.x0, -src.y0));

        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx.set_paint_transform(affine_to_cpu(paint_transform));
        self.ctx.set_paint(image.clone());
        self.ctx.fill_rect(&rect_to_cpu(dst));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
        self.state.clip_layers = 0;
    }

    fn restore(&mut self) {
        let Some(prev) = self.stack.pop() else {
            return;
        };
        for _ in 0..self.state.clip_layers {
            self.ctx.pop_layer();
        }
        self.state = prev;
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
    }

    fn clip_path(&mut self, path: &BezPath) {
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx.push_clip_layer(&bezpath_to_cpu(path));
        self.state.clip_layers += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        let mut stroke = vello_cpu::kurbo::Stroke::new(style.width);
        if let Some([dash, gap]) = style.dash {
            stroke = stroke.with_dashes(0.0, [dash, gap]);
        }
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx.set_stroke(stroke);
        self.ctx.set_paint(color_to_cpu(style.color));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn snapshot(&mut self) -> BillboardResult<FrameRGBA> {
        if self.open_clip_layers() > 0 {
            return Err(BillboardError::validation(
                "snapshot requested with unbalanced clip layers",
            ));
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> BillboardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BillboardError::invalid_image("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BillboardError::invalid_image("image height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(BillboardError::invalid_image("image has zero size"));
    }
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(BillboardError::validation("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
