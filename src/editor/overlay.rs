//! Guide overlays drawn on top of the composite: billboard outlines, the dimmed
//! selection with handles, perspective corner dots and the magnifier lens.

use kurbo::{Circle, Shape};

use crate::{
    assets::raster::RasterImage,
    editor::state::{EditorMode, Magnifier, PerspectiveEdit, QuadEditor, RectEdit},
    foundation::core::{BezPath, Canvas, Point, Rect, Rgba8},
    foundation::error::BillboardResult,
    geometry::quad::{Corner, Quad},
    render::surface::{DrawingSurface, StrokeStyle},
};

const ACCENT: Rgba8 = Rgba8::opaque(0x3b, 0x82, 0xf6);
const ACTIVE: Rgba8 = Rgba8::opaque(0x25, 0x63, 0xeb);
const WITH_BANNER: Rgba8 = Rgba8::opaque(0x10, 0xb9, 0x81);
const IDLE: Rgba8 = Rgba8::opaque(0x94, 0xa3, 0xb8);
const DIM: Rgba8 = Rgba8::new(0, 0, 0, 102);

const GUIDE_WIDTH: f64 = 3.0;
const GUIDE_DASH: [f64; 2] = [10.0, 5.0];
const DOT_RADIUS: f64 = 4.0;
const DOT_RING: f64 = 2.0;
const LENS_BORDER: f64 = 4.0;
const CROSSHAIR: f64 = 12.0;
const CROSSHAIR_WIDTH: f64 = 2.0;
const LENS_DOT: f64 = 3.0;
const PATH_TOLERANCE: f64 = 0.1;

/// How a billboard outline is emphasised in the preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineState {
    /// The billboard currently selected for editing.
    Active,
    /// A billboard with a banner assigned.
    WithBanner,
    /// Any other billboard.
    Idle,
}

impl OutlineState {
    /// Stroke for this state.
    pub fn stroke(self) -> StrokeStyle {
        match self {
            Self::Active => StrokeStyle::solid(4.0, ACTIVE),
            Self::WithBanner => StrokeStyle::solid(3.0, WITH_BANNER),
            Self::Idle => StrokeStyle::solid(2.0, IDLE),
        }
    }
}

/// Dashed blue stroke used for the working shape while editing.
pub fn guide_stroke() -> StrokeStyle {
    StrokeStyle::dashed(GUIDE_WIDTH, ACCENT, GUIDE_DASH)
}

/// Marker colour for a perspective corner.
pub fn corner_color(corner: Corner) -> Rgba8 {
    match corner {
        Corner::TopLeft => Rgba8::opaque(0xef, 0x44, 0x44),
        Corner::TopRight => Rgba8::opaque(0x10, 0xb9, 0x81),
        Corner::BottomLeft => Rgba8::opaque(0xf5, 0x9e, 0x0b),
        Corner::BottomRight => Rgba8::opaque(0x8b, 0x5c, 0xf6),
    }
}

/// Stroke a billboard's outline TL→TR→BR→BL.
pub fn draw_billboard_outline<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    quad: &Quad,
    state: OutlineState,
) {
    surface.stroke_path(&quad.to_path(), &state.stroke());
}

/// Draw the editor guides for the current mode on top of whatever the surface holds.
///
/// `base` is the uploaded base screenshot; it is redrawn undimmed inside the rect
/// selection and sampled by the magnifier.
pub fn draw_editor_overlay<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    editor: &QuadEditor,
    base: &S::Image,
) {
    let canvas = editor.canvas();
    match editor.mode() {
        EditorMode::Idle => {}
        EditorMode::RectEditing(edit) => {
            draw_rect_overlay(surface, base, canvas, edit, editor.config().handle_size)
        }
        EditorMode::PerspectiveEditing(edit) => {
            draw_perspective_overlay(surface, base, canvas, edit, editor.magnifier().as_ref())
        }
    }
}

/// Clear the surface, draw `base` and the editor guides on top.
#[tracing::instrument(skip_all)]
pub fn render_editor_frame<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    editor: &QuadEditor,
    base: &RasterImage,
) -> BillboardResult<()> {
    surface.clear();
    let image = surface.upload(base)?;
    let full = Rect::from_origin_size(Point::ORIGIN, base.size());
    surface.draw_image(&image, full, full);
    draw_editor_overlay(surface, editor, &image);
    Ok(())
}

fn draw_rect_overlay<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    base: &S::Image,
    canvas: Canvas,
    edit: &RectEdit,
    handle_size: f64,
) {
    let selection = edit.selection();
    let rect = selection.to_rect();

    surface.fill_rect(canvas.rect(), DIM);
    if rect.area() > 0.0 {
        surface.draw_image(base, rect, rect);
    }
    surface.stroke_path(&Quad::from_rect(rect).to_path(), &guide_stroke());

    for corner in Corner::ALL {
        let c = selection.corner(corner);
        let ring = handle_size + 2.0;
        surface.fill_rect(Rect::from_center_size(c, (ring, ring)), Rgba8::WHITE);
        surface.fill_rect(Rect::from_center_size(c, (handle_size, handle_size)), ACCENT);
    }
}

fn draw_perspective_overlay<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    base: &S::Image,
    canvas: Canvas,
    edit: &PerspectiveEdit,
    magnifier: Option<&Magnifier>,
) {
    let quad = edit.quad();

    surface.fill_rect(canvas.rect(), DIM);
    surface.stroke_path(&quad.to_path(), &guide_stroke());

    for corner in Corner::ALL {
        let p = quad.corner(corner);
        surface.fill_path(&circle(p, DOT_RADIUS + DOT_RING), Rgba8::WHITE);
        surface.fill_path(&circle(p, DOT_RADIUS), corner_color(corner));
    }

    if let Some(m) = magnifier {
        draw_magnifier(surface, base, m);
    }
}

fn draw_magnifier<S: DrawingSurface + ?Sized>(surface: &mut S, base: &S::Image, m: &Magnifier) {
    let lens = circle(m.center, m.radius);
    surface.save();
    surface.clip_path(&lens);
    surface.draw_image(base, m.source, m.target());
    surface.restore();

    surface.stroke_path(&lens, &StrokeStyle::solid(LENS_BORDER, ACCENT));

    let color = corner_color(m.corner);
    let (cx, cy) = (m.center.x, m.center.y);
    let mut cross = BezPath::new();
    cross.move_to((cx, cy - CROSSHAIR));
    cross.line_to((cx, cy + CROSSHAIR));
    cross.move_to((cx - CROSSHAIR, cy));
    cross.line_to((cx + CROSSHAIR, cy));
    surface.stroke_path(&cross, &StrokeStyle::solid(CROSSHAIR_WIDTH, color));
    surface.fill_path(&circle(m.center, LENS_DOT), color);
}

fn circle(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius).to_path(PATH_TOLERANCE)
}

#[cfg(test)]
#[path = "../../tests/unit/editor/overlay.rs"]
mod tests;
