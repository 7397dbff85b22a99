//! Interactive quad editor: a pointer-driven state machine producing billboard quads.

use crate::{
    editor::redraw::RedrawScheduler,
    foundation::core::{Canvas, Point, Rect, Size, Vec2},
    foundation::error::{BillboardError, BillboardResult},
    foundation::math::distance,
    geometry::quad::{Corner, Quad},
    scene::billboard::{Billboard, default_quad},
};

/// Magnifier placement and zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagnifierConfig {
    /// Magnification factor.
    pub zoom: f64,
    /// Lens radius in surface pixels.
    pub radius: f64,
    /// Lens centre offset from the dragged corner.
    pub offset: Vec2,
    /// Extra gap kept between the lens and the canvas edge.
    pub edge_padding: f64,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            zoom: 3.0,
            radius: 80.0,
            offset: Vec2::new(100.0, -100.0),
            edge_padding: 10.0,
        }
    }
}

/// Editor tuning in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    /// Committed and dragged perspective corners stay this far inside the canvas.
    pub margin: f64,
    /// Lower bound for rectangle width and height while resizing.
    pub min_rect_size: f64,
    /// Half-extent of the square hit box around rectangle corners.
    pub handle_size: f64,
    /// Hit radius around perspective corners.
    pub corner_hit_radius: f64,
    /// Size of the centred rectangle used when no billboard seeds a rect edit.
    pub default_rect_size: Size,
    /// Magnifier shown while a perspective corner is dragged.
    pub magnifier: MagnifierConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            min_rect_size: 10.0,
            handle_size: 16.0,
            corner_hit_radius: 15.0,
            default_rect_size: Size::new(200.0, 300.0),
            magnifier: MagnifierConfig::default(),
        }
    }
}

/// Pointer input in surface pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Down(Point),
    /// Pointer moved (with or without a button held).
    Move(Point),
    /// Button released.
    Up(Point),
}

/// Cursor the host should show over a given point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    /// No edit in progress.
    Default,
    /// Pressing here starts a new selection.
    Crosshair,
    /// Pressing here moves the rectangle.
    Move,
    /// Pressing here grabs a perspective corner.
    Pointer,
    /// Pressing here resizes from the given rectangle corner.
    Resize(Corner),
}

/// Rectangle in origin + signed size form.
///
/// Width and height go negative while a new selection is dragged up or left; releasing
/// the pointer normalizes them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// Left edge (right edge when `width` is negative).
    pub x: f64,
    /// Top edge (bottom edge when `height` is negative).
    pub y: f64,
    /// Signed width.
    pub width: f64,
    /// Signed height.
    pub height: f64,
}

impl Selection {
    /// Selection covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
        }
    }

    /// Corner position for the current signed extent.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.x, self.y),
            Corner::TopRight => Point::new(self.x + self.width, self.y),
            Corner::BottomLeft => Point::new(self.x, self.y + self.height),
            Corner::BottomRight => Point::new(self.x + self.width, self.y + self.height),
        }
    }

    /// Inclusive containment test against the signed extent.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Same area with non-negative width and height.
    pub fn normalized(self) -> Self {
        let mut s = self;
        if s.width < 0.0 {
            s.x += s.width;
            s.width = -s.width;
        }
        if s.height < 0.0 {
            s.y += s.height;
            s.height = -s.height;
        }
        s
    }

    /// Normalized rectangle.
    pub fn to_rect(&self) -> Rect {
        let n = self.normalized();
        Rect::new(n.x, n.y, n.x + n.width, n.y + n.height)
    }

    /// Quad whose corners are this selection's corners.
    pub fn to_quad(&self) -> Quad {
        Quad::new(
            self.corner(Corner::TopLeft),
            self.corner(Corner::TopRight),
            self.corner(Corner::BottomLeft),
            self.corner(Corner::BottomRight),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum RectDrag {
    Resize { corner: Corner, start: Selection },
    Move { grab: Vec2 },
    Select { anchor: Point },
}

/// Working state of an axis-aligned rectangle edit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectEdit {
    selection: Selection,
    drag: Option<RectDrag>,
}

impl RectEdit {
    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn hit_handle(&self, p: Point, handle: f64) -> Option<Corner> {
        Corner::ALL.into_iter().find(|&c| {
            let q = self.selection.corner(c);
            (p.x - q.x).abs() <= handle && (p.y - q.y).abs() <= handle
        })
    }

    fn handle(&mut self, event: PointerEvent, canvas: Canvas, config: &EditorConfig) -> bool {
        match event {
            PointerEvent::Down(p) => {
                if let Some(corner) = self.hit_handle(p, config.handle_size) {
                    self.drag = Some(RectDrag::Resize {
                        corner,
                        start: self.selection,
                    });
                    false
                } else if self.selection.contains(p) {
                    self.drag = Some(RectDrag::Move {
                        grab: p - Point::new(self.selection.x, self.selection.y),
                    });
                    false
                } else {
                    self.selection = Selection {
                        x: p.x,
                        y: p.y,
                        width: 0.0,
                        height: 0.0,
                    };
                    self.drag = Some(RectDrag::Select { anchor: p });
                    true
                }
            }
            PointerEvent::Move(p) => {
                let Some(drag) = self.drag else {
                    return false;
                };
                self.selection = match drag {
                    RectDrag::Resize { corner, start } => {
                        resize(start, corner, p, config.min_rect_size)
                    }
                    RectDrag::Move { grab } => {
                        let size = canvas.size();
                        let s = self.selection;
                        Selection {
                            x: (p.x - grab.x).min(size.width - s.width).max(0.0),
                            y: (p.y - grab.y).min(size.height - s.height).max(0.0),
                            ..s
                        }
                    }
                    RectDrag::Select { anchor } => Selection {
                        x: anchor.x,
                        y: anchor.y,
                        width: p.x - anchor.x,
                        height: p.y - anchor.y,
                    },
                };
                true
            }
            PointerEvent::Up(_) => {
                let drag = self.drag.take();
                let before = self.selection;
                let mut released = before;
                if let Some(RectDrag::Select { .. }) = drag {
                    released.width = floor_extent(released.width, config.min_rect_size);
                    released.height = floor_extent(released.height, config.min_rect_size);
                }
                self.selection = released.normalized();
                drag.is_some() || before != self.selection
            }
        }
    }
}

// Grows a signed extent to at least `min`, keeping its direction; zero grows positive.
fn floor_extent(extent: f64, min: f64) -> f64 {
    if extent.abs() >= min {
        extent
    } else if extent < 0.0 {
        -min
    } else {
        min
    }
}

// The corner opposite `corner` stays where it was when the resize began.
fn resize(start: Selection, corner: Corner, p: Point, min: f64) -> Selection {
    let start = start.normalized();
    let right = start.x + start.width;
    let bottom = start.y + start.height;
    let (x, width) = match corner {
        Corner::TopLeft | Corner::BottomLeft => {
            let w = (right - p.x).max(min);
            (right - w, w)
        }
        Corner::TopRight | Corner::BottomRight => (start.x, (p.x - start.x).max(min)),
    };
    let (y, height) = match corner {
        Corner::TopLeft | Corner::TopRight => {
            let h = (bottom - p.y).max(min);
            (bottom - h, h)
        }
        Corner::BottomLeft | Corner::BottomRight => (start.y, (p.y - start.y).max(min)),
    };
    Selection {
        x,
        y,
        width,
        height,
    }
}

/// Working state of a four-corner perspective edit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveEdit {
    quad: Quad,
    dragged: Option<Corner>,
}

impl PerspectiveEdit {
    /// Current corners, at full precision.
    pub fn quad(&self) -> Quad {
        self.quad
    }

    /// Corner being dragged, if any.
    pub fn dragged(&self) -> Option<Corner> {
        self.dragged
    }

    fn hit_corner(&self, p: Point, radius: f64) -> Option<Corner> {
        Corner::ALL
            .into_iter()
            .find(|&c| distance(p, self.quad.corner(c)) <= radius)
    }

    fn handle(&mut self, event: PointerEvent, canvas: Canvas, config: &EditorConfig) -> bool {
        match event {
            PointerEvent::Down(p) => {
                self.dragged = self.hit_corner(p, config.corner_hit_radius);
                self.dragged.is_some()
            }
            PointerEvent::Move(p) => {
                let Some(corner) = self.dragged else {
                    return false;
                };
                *self.quad.corner_mut(corner) = canvas.clamp_point(p, config.margin);
                true
            }
            PointerEvent::Up(_) => self.dragged.take().is_some(),
        }
    }
}

/// Editor mode; working state lives inside the active variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorMode {
    /// No edit in progress; pointer events are ignored.
    Idle,
    /// Axis-aligned rectangle edit.
    RectEditing(RectEdit),
    /// Four-corner perspective edit.
    PerspectiveEditing(PerspectiveEdit),
}

/// Magnified preview around a dragged corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Magnifier {
    /// Corner being dragged.
    pub corner: Corner,
    /// Corner position (centre of the magnified area).
    pub focus: Point,
    /// Lens centre on the surface.
    pub center: Point,
    /// Lens radius.
    pub radius: f64,
    /// Area of the base image shown in the lens.
    pub source: Rect,
}

impl Magnifier {
    /// Square the source area is drawn into (clipped to the lens circle).
    pub fn target(&self) -> Rect {
        Rect::from_center_size(self.center, (self.radius * 2.0, self.radius * 2.0))
    }
}

impl MagnifierConfig {
    /// Lens for a corner at `focus`, pushed inside `canvas` by `radius + edge_padding`.
    pub fn place(&self, corner: Corner, focus: Point, canvas: Canvas) -> Magnifier {
        let size = canvas.size();
        let keep = self.radius + self.edge_padding;
        let center = Point::new(
            (focus.x + self.offset.x).max(keep).min(size.width - keep),
            (focus.y + self.offset.y).max(keep).min(size.height - keep),
        );
        let side = self.radius * 2.0 / self.zoom;
        Magnifier {
            corner,
            focus,
            center,
            radius: self.radius,
            source: Rect::from_center_size(focus, (side, side)),
        }
    }
}

/// Pointer-driven editor for one billboard's quad.
///
/// The billboard being edited is passed explicitly to the start and confirm calls;
/// nothing is written back until [`QuadEditor::confirm`].
#[derive(Clone, Debug)]
pub struct QuadEditor {
    canvas: Canvas,
    config: EditorConfig,
    mode: EditorMode,
    redraw: RedrawScheduler,
}

impl QuadEditor {
    /// Idle editor over `canvas` with default settings.
    pub fn new(canvas: Canvas) -> Self {
        Self::with_config(canvas, EditorConfig::default())
    }

    /// Idle editor over `canvas`.
    pub fn with_config(canvas: Canvas, config: EditorConfig) -> Self {
        Self {
            canvas,
            config,
            mode: EditorMode::Idle,
            redraw: RedrawScheduler::default(),
        }
    }

    /// Canvas the editor clamps to.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Active settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current mode and its working state.
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Whether no edit is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self.mode, EditorMode::Idle)
    }

    /// Begin a rectangle edit seeded from `billboard`'s top-left and bottom-right corners,
    /// or from a centred default rectangle.
    pub fn start_rect(&mut self, billboard: Option<&Billboard>) -> BillboardResult<()> {
        self.ensure_idle()?;
        let selection = match billboard {
            Some(b) => {
                let q = b.perspective;
                Selection {
                    x: q.top_left.x,
                    y: q.top_left.y,
                    width: q.bottom_right.x - q.top_left.x,
                    height: q.bottom_right.y - q.top_left.y,
                }
                .normalized()
            }
            None => {
                let c = self.canvas.size();
                let d = self.config.default_rect_size;
                Selection {
                    x: c.width / 2.0 - d.width / 2.0,
                    y: c.height / 2.0 - d.height / 2.0,
                    width: d.width,
                    height: d.height,
                }
            }
        };
        self.mode = EditorMode::RectEditing(RectEdit {
            selection,
            drag: None,
        });
        self.redraw.request();
        Ok(())
    }

    /// Begin a perspective edit seeded from `billboard`'s quad, or from the default quad.
    /// Seed corners are clamped inside the canvas margin.
    pub fn start_perspective(&mut self, billboard: Option<&Billboard>) -> BillboardResult<()> {
        self.ensure_idle()?;
        let quad = billboard
            .map(|b| b.perspective)
            .unwrap_or_else(|| default_quad(self.canvas))
            .clamp_to(self.canvas, self.config.margin);
        self.mode = EditorMode::PerspectiveEditing(PerspectiveEdit {
            quad,
            dragged: None,
        });
        self.redraw.request();
        Ok(())
    }

    /// Drop the working state and return to idle.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            self.mode = EditorMode::Idle;
            self.redraw.request();
        }
    }

    /// Feed one pointer event. Returns whether the visible state changed.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        let changed = match &mut self.mode {
            EditorMode::Idle => false,
            EditorMode::RectEditing(edit) => edit.handle(event, self.canvas, &self.config),
            EditorMode::PerspectiveEditing(edit) => edit.handle(event, self.canvas, &self.config),
        };
        if changed {
            self.redraw.request();
        }
        changed
    }

    /// Quad the current working state would commit, before clamping and rounding.
    pub fn working_quad(&self) -> Option<Quad> {
        match &self.mode {
            EditorMode::Idle => None,
            EditorMode::RectEditing(edit) => Some(edit.selection.normalized().to_quad()),
            EditorMode::PerspectiveEditing(edit) => Some(edit.quad),
        }
    }

    /// Clamp, round and validate the working quad, write it into `billboard` and go idle.
    ///
    /// On error the editor and the billboard are left untouched.
    pub fn confirm(&mut self, billboard: &mut Billboard) -> BillboardResult<Quad> {
        let quad = self
            .working_quad()
            .ok_or_else(|| BillboardError::validation("no edit in progress"))?
            .clamp_to(self.canvas, self.config.margin)
            .round();
        quad.validate()?;
        billboard.commit(quad);
        self.mode = EditorMode::Idle;
        self.redraw.request();
        tracing::debug!(billboard = %billboard.id, ?quad, "committed billboard quad");
        Ok(quad)
    }

    /// Rectangle corner whose handle box contains `p` (rect mode only).
    pub fn hit_rect_handle(&self, p: Point) -> Option<Corner> {
        match &self.mode {
            EditorMode::RectEditing(edit) => edit.hit_handle(p, self.config.handle_size),
            _ => None,
        }
    }

    /// Perspective corner within the hit radius of `p` (perspective mode only).
    pub fn hit_corner(&self, p: Point) -> Option<Corner> {
        match &self.mode {
            EditorMode::PerspectiveEditing(edit) => {
                edit.hit_corner(p, self.config.corner_hit_radius)
            }
            _ => None,
        }
    }

    /// Cursor to show when the pointer hovers `p`.
    pub fn cursor_at(&self, p: Point) -> CursorHint {
        match &self.mode {
            EditorMode::Idle => CursorHint::Default,
            EditorMode::RectEditing(edit) => match edit.hit_handle(p, self.config.handle_size) {
                Some(corner) => CursorHint::Resize(corner),
                None if edit.selection.contains(p) => CursorHint::Move,
                None => CursorHint::Crosshair,
            },
            EditorMode::PerspectiveEditing(edit) => {
                if edit.dragged.is_some() || self.hit_corner(p).is_some() {
                    CursorHint::Pointer
                } else {
                    CursorHint::Crosshair
                }
            }
        }
    }

    /// Magnifier for the corner being dragged, if any.
    pub fn magnifier(&self) -> Option<Magnifier> {
        let EditorMode::PerspectiveEditing(edit) = &self.mode else {
            return None;
        };
        let corner = edit.dragged?;
        Some(
            self.config
                .magnifier
                .place(corner, edit.quad.corner(corner), self.canvas),
        )
    }

    /// Whether a redraw is waiting.
    pub fn redraw_pending(&self) -> bool {
        self.redraw.is_pending()
    }

    /// Consume the pending redraw; the host draws a frame when this returns `true`.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    fn ensure_idle(&self) -> BillboardResult<()> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(BillboardError::validation("an edit is already in progress"))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/state.rs"]
mod tests;
