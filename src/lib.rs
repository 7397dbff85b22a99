//! Billboard composites rectangular banner images onto quadrilateral regions of a
//! screenshot, approximating perspective with nothing but transformed rectangle blits.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: a [`QuadEditor`] turns pointer events into a committed [`Quad`] on a [`Billboard`].
//! 2. **Letterbox**: the banner is fitted into an offscreen buffer sized to the quad ([`fit`]).
//! 3. **Composite**: the buffer is cut into an `N×N` grid and each tile is blitted with a
//!    local affine transform ([`composite_banner`]).
//! 4. **Export**: a [`Scene`] renders the base screenshot plus every banner and encodes PNG.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Surface-agnostic**: all drawing goes through [`DrawingSurface`]; [`CpuSurface`]
//!   rasterizes with `vello_cpu`, [`RecordingSurface`] records calls for inspection.
//! - **Premultiplied RGBA8** end-to-end: decoded rasters and snapshots are premultiplied.
//! - **Local failures stay local**: a rejected quad or banner skips one billboard, never the scene.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod editor;
mod foundation;
mod geometry;
mod render;
mod scene;

pub use assets::decode::{decode_image, load_image};
pub use assets::raster::RasterImage;
pub use editor::overlay::{
    OutlineState, corner_color, draw_billboard_outline, draw_editor_overlay, guide_stroke,
    render_editor_frame,
};
pub use editor::redraw::RedrawScheduler;
pub use editor::state::{
    CursorHint, EditorConfig, EditorMode, Magnifier, MagnifierConfig, PerspectiveEdit,
    PointerEvent, QuadEditor, RectEdit, Selection,
};
pub use foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{BillboardError, BillboardResult};
pub use geometry::letterbox::{LetterboxFit, aspect_ratio, fit};
pub use geometry::quad::{Corner, Quad};
pub use render::FrameRGBA;
pub use render::compositor::{
    CompositeStats, CompositorOpts, DEFAULT_GRID_SEGMENTS, DEFAULT_MAX_BUFFER_PIXELS, TileCell,
    buffer_size, cell_transform, composite_banner, map_through_cell, plan_tiles,
};
pub use render::cpu::CpuSurface;
pub use render::export::encode_png;
pub use render::recording::{RecordingSurface, SurfaceCall};
pub use render::surface::{DrawingSurface, StrokeStyle};
pub use scene::billboard::{Billboard, BillboardId, default_quad};
pub use scene::catalog::{BillboardRecord, Catalog, Game, Screenshot};
pub use scene::compose::{RenderOpts, RenderReport, Scene};
pub use scene::store::{BillboardStore, JsonFileStore};
