//! Grid-based local-affine compositor: renders a rectangular banner into an arbitrary quad
//! using nothing but transformed rectangular blits.

use crate::{
    assets::raster::RasterImage,
    foundation::core::{Affine, Point, Rect, Rgba8, Size, Vec2},
    foundation::error::{BillboardError, BillboardResult},
    foundation::math::{distance, edge_angle},
    geometry::quad::Quad,
    render::letterbox::letterbox_buffer,
    render::surface::DrawingSurface,
};

/// Default grid resolution per axis.
pub const DEFAULT_GRID_SEGMENTS: u32 = 25;

/// Default cap on letterbox buffer pixels (4096 × 4096).
pub const DEFAULT_MAX_BUFFER_PIXELS: u64 = 1 << 24;

const GRID_SEGMENTS_ENV: &str = "BILLBOARD_GRID_SEGMENTS";
const MIN_EXTENT: f64 = 1e-9;

/// Tuning knobs for [`composite_banner`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorOpts {
    /// Cells per axis (`N` in an `N×N` grid).
    pub grid_segments: u32,
    /// Per-side tile overlap, divided by `grid_segments` to give the normalized widening
    /// of each cell (`0.5` widens a cell by `0.5 / N` of the buffer on every side).
    pub overlap: f64,
    /// Letterbox padding and seam backfill colour.
    pub padding: Rgba8,
    /// Largest letterbox buffer, in pixels, a single billboard may allocate.
    pub max_buffer_pixels: u64,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            grid_segments: DEFAULT_GRID_SEGMENTS,
            overlap: 0.5,
            padding: Rgba8::BLACK,
            max_buffer_pixels: DEFAULT_MAX_BUFFER_PIXELS,
        }
    }
}

impl CompositorOpts {
    /// Defaults, with `BILLBOARD_GRID_SEGMENTS` overriding the grid when set to a positive integer.
    pub fn from_env() -> Self {
        let grid_segments = std::env::var(GRID_SEGMENTS_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_GRID_SEGMENTS);
        Self {
            grid_segments,
            ..Self::default()
        }
    }

    /// Reject options the tile planner cannot work with.
    pub fn validate(&self) -> BillboardResult<()> {
        if self.grid_segments == 0 {
            return Err(BillboardError::validation("grid_segments must be > 0"));
        }
        if !self.overlap.is_finite() || self.overlap < 0.0 {
            return Err(BillboardError::validation(
                "overlap must be finite and >= 0",
            ));
        }
        if self.max_buffer_pixels == 0 {
            return Err(BillboardError::validation("max_buffer_pixels must be > 0"));
        }
        Ok(())
    }
}

/// One grid cell: where it reads from the letterbox buffer and where it lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileCell {
    /// Grid row (v axis).
    pub row: u32,
    /// Grid column (u axis).
    pub col: u32,
    /// Source rectangle in letterbox-buffer pixels (overlap included).
    pub src: Rect,
    /// Destination corners on the surface.
    pub dst: Quad,
    /// Local affine approximation, `None` when the cell is degenerate and must be skipped.
    pub transform: Option<Affine>,
}

/// Counters from one [`composite_banner`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Letterbox buffer width in pixels.
    pub buffer_width: u32,
    /// Letterbox buffer height in pixels.
    pub buffer_height: u32,
    /// Cells blitted.
    pub cells_drawn: u32,
    /// Cells skipped as degenerate.
    pub cells_skipped: u32,
}

/// Letterbox buffer size for `quad`: the estimated size rounded up, at least 1×1.
///
/// Quads whose buffer would exceed `max_pixels` are rejected as [`BillboardError::DegenerateQuad`].
pub fn buffer_size(quad: &Quad, max_pixels: u64) -> BillboardResult<(u32, u32)> {
    let size = quad.estimate_size();
    let to_px = |v: f64| -> BillboardResult<u32> {
        if !v.is_finite() || v > f64::from(u16::MAX) {
            return Err(BillboardError::degenerate_quad(format!(
                "estimated billboard extent {v} is not renderable"
            )));
        }
        Ok((v.ceil() as u32).max(1))
    };
    let (w, h) = (to_px(size.width)?, to_px(size.height)?);
    if u64::from(w) * u64::from(h) > max_pixels {
        return Err(BillboardError::degenerate_quad(format!(
            "letterbox buffer {w}x{h} exceeds the {max_pixels} pixel budget"
        )));
    }
    Ok((w, h))
}

/// Local affine for a cell: translate to the destination top-left, rotate to the top edge,
/// then scale the source rect onto the top and left edge lengths.
///
/// Returns `None` for zero-length source or destination edges and non-finite results.
pub fn cell_transform(dst: &Quad, src: Rect) -> Option<Affine> {
    let (sw, sh) = (src.width(), src.height());
    if !(sw > MIN_EXTENT && sh > MIN_EXTENT) {
        return None;
    }
    let dw = distance(dst.top_left, dst.top_right);
    let dh = distance(dst.top_left, dst.bottom_left);
    if !(dw > MIN_EXTENT && dh > MIN_EXTENT) {
        return None;
    }
    let scale_x = dw / sw;
    let scale_y = dh / sh;
    let angle = edge_angle(dst.top_left, dst.top_right);
    if !(scale_x.is_finite() && scale_y.is_finite() && angle.is_finite()) {
        return None;
    }
    Some(
        Affine::translate(dst.top_left.to_vec2())
            * Affine::rotate(angle)
            * Affine::scale_non_uniform(scale_x, scale_y),
    )
}

/// Partition the unit square into `opts.grid_segments²` cells mapped onto `quad`.
///
/// Each cell is widened by `overlap / N` (normalized) per side, clamped to `[0, 1]`.
pub fn plan_tiles(quad: &Quad, buffer: Size, opts: &CompositorOpts) -> Vec<TileCell> {
    let n = opts.grid_segments.max(1);
    let nf = f64::from(n);
    let overlap = opts.overlap / nf;

    let mut cells = Vec::with_capacity((n * n) as usize);
    for row in 0..n {
        for col in 0..n {
            let u0 = (f64::from(col) / nf - overlap).max(0.0);
            let v0 = (f64::from(row) / nf - overlap).max(0.0);
            let u1 = (f64::from(col + 1) / nf + overlap).min(1.0);
            let v1 = (f64::from(row + 1) / nf + overlap).min(1.0);

            let src = Rect::new(
                u0 * buffer.width,
                v0 * buffer.height,
                u1 * buffer.width,
                v1 * buffer.height,
            );
            let dst = Quad::new(
                quad.interpolate(u0, v0),
                quad.interpolate(u1, v0),
                quad.interpolate(u0, v1),
                quad.interpolate(u1, v1),
            );
            cells.push(TileCell {
                row,
                col,
                src,
                dst,
                transform: cell_transform(&dst, src),
            });
        }
    }
    cells
}

/// Render `banner` into `quad` on `surface`, letterboxed and perspective-approximated.
///
/// The quad and banner are validated before anything touches the surface, so a failure
/// leaves earlier content intact. All drawing happens inside one save/restore pair and
/// every cell is individually bracketed, so transforms never compound.
#[tracing::instrument(skip(surface, banner), fields(banner_w = banner.width, banner_h = banner.height))]
pub fn composite_banner<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    quad: &Quad,
    banner: &RasterImage,
    opts: &CompositorOpts,
) -> BillboardResult<CompositeStats> {
    opts.validate()?;
    quad.validate()?;
    banner.aspect()?;

    let (bw, bh) = buffer_size(quad, opts.max_buffer_pixels)?;
    let buffer = letterbox_buffer(banner, bw, bh, opts.padding)?;
    let image = surface.upload(&buffer)?;

    let cells = plan_tiles(quad, buffer.size(), opts);
    let outline = quad.to_path();

    let mut stats = CompositeStats {
        buffer_width: bw,
        buffer_height: bh,
        ..CompositeStats::default()
    };

    surface.save();
    surface.clip_path(&outline);
    surface.fill_path(&outline, opts.padding);

    for cell in &cells {
        let Some(local) = cell.transform else {
            stats.cells_skipped += 1;
            continue;
        };
        surface.save();
        blit_cell(surface, &image, cell, local);
        surface.restore();
        stats.cells_drawn += 1;
    }

    surface.restore();

    tracing::debug!(
        buffer_w = bw,
        buffer_h = bh,
        drawn = stats.cells_drawn,
        skipped = stats.cells_skipped,
        "composited banner"
    );
    Ok(stats)
}

fn blit_cell<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    image: &S::Image,
    cell: &TileCell,
    local: Affine,
) {
    // translate -> rotate -> scale, expressed as a single post-multiplied affine.
    let base = surface.transform();
    surface.set_transform(base * local);
    let (sw, sh) = (cell.src.width(), cell.src.height());
    surface.draw_image(image, cell.src, Rect::new(0.0, 0.0, sw, sh));
}

/// Destination point for normalized buffer coordinates under a cell's local affine.
pub fn map_through_cell(cell: &TileCell, u: f64, v: f64) -> Option<Point> {
    let local = cell.transform?;
    let p = Vec2::new(u * cell.src.width(), v * cell.src.height());
    Some(local * p.to_point())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
