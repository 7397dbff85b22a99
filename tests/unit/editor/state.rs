use super::*;

fn canvas() -> Canvas {
    Canvas::new(800, 600)
}

fn rect_billboard(x: f64, y: f64, w: f64, h: f64) -> Billboard {
    Billboard::new(1u64, Quad::from_rect(Rect::new(x, y, x + w, y + h)))
}

fn perspective_billboard() -> Billboard {
    Billboard::new(
        1u64,
        Quad::new(
            Point::new(100.0, 100.0),
            Point::new(400.0, 120.0),
            Point::new(90.0, 400.0),
            Point::new(400.0, 400.0),
        ),
    )
}

fn selection(ed: &QuadEditor) -> Selection {
    match ed.mode() {
        EditorMode::RectEditing(edit) => edit.selection(),
        other => panic!("not in rect mode: {other:?}"),
    }
}

#[test]
fn idle_ignores_pointer_events() {
    let mut ed = QuadEditor::new(canvas());
    assert!(!ed.handle(PointerEvent::Down(Point::new(10.0, 10.0))));
    assert!(!ed.handle(PointerEvent::Move(Point::new(20.0, 20.0))));
    assert!(ed.is_idle());
    assert!(!ed.redraw_pending());
}

#[test]
fn rect_commit_round_trips_through_bounding_box() {
    let mut b = rect_billboard(100.0, 50.0, 200.0, 300.0);
    let mut ed = QuadEditor::new(canvas());
    ed.start_rect(Some(&b)).unwrap();
    let q = ed.confirm(&mut b).unwrap();

    assert_eq!(q.top_left, Point::new(100.0, 50.0));
    assert_eq!(q.top_right, Point::new(300.0, 50.0));
    assert_eq!(q.bottom_left, Point::new(100.0, 350.0));
    assert_eq!(q.bottom_right, Point::new(300.0, 350.0));
    assert_eq!(b.bounds, Rect::new(100.0, 50.0, 300.0, 350.0));
    assert!(ed.is_idle());
}

#[test]
fn rect_defaults_to_centred_200_by_300() {
    let mut ed = QuadEditor::new(canvas());
    ed.start_rect(None).unwrap();
    let s = selection(&ed);
    assert_eq!((s.x, s.y, s.width, s.height), (300.0, 150.0, 200.0, 300.0));
}

#[test]
fn rect_resize_anchors_opposite_corner_and_floors_size() {
    let b = rect_billboard(100.0, 100.0, 200.0, 200.0);
    let mut ed = QuadEditor::new(canvas());
    ed.start_rect(Some(&b)).unwrap();

    assert_eq!(ed.hit_rect_handle(Point::new(110.0, 95.0)), Some(Corner::TopLeft));
    ed.handle(PointerEvent::Down(Point::new(105.0, 105.0)));
    ed.handle(PointerEvent::Move(Point::new(150.0, 120.0)));
    let s = selection(&ed);
    assert_eq!((s.x, s.y, s.width, s.height), (150.0, 120.0, 150.0, 180.0));

    // Dragging past the anchor floors the size and keeps the bottom-right fixed.
    ed.handle(PointerEvent::Move(Point::new(500.0, 500.0)));
    let s = selection(&ed);
    assert_eq!((s.x, s.y, s.width, s.height), (290.0, 290.0, 10.0, 10.0));
    ed.handle(PointerEvent::Up(Point::new(500.0, 500.0)));
}

#[test]
fn rect_move_is_kept_inside_canvas() {
    let b = rect_billboard(100.0, 100.0, 200.0, 200.0);
    let mut ed = QuadEditor::new(canvas());
    ed.start_rect(Some(&b)).unwrap();

    assert_eq!(ed.cursor_at(Point::new(200.0, 200.0)), CursorHint::Move);
    ed.handle(PointerEvent::Down(Point::new(200.0, 200.0)));
    ed.handle(PointerEvent::Move(Point::new(250.0, 220.0)));
    let s = selection(&ed);
    assert_eq!((s.x, s.y), (150.0, 120.0));

    ed.handle(PointerEvent::Move(Point::new(2000.0, -500.0)));
    let s = selection(&ed);
    assert_eq!((s.x, s.y), (600.0, 0.0));
    assert_eq!((s.width, s.height), (200.0, 200.0));
}

#[test]
fn new_selection_is_normalized_on_release() {
    let b = rect_billboard(100.0, 100.0, 50.0, 50.0);
    let mut ed = QuadEditor::new(canvas());
    ed.start_rect(Some(&b)).unwrap();

    assert_eq!(ed.cursor_at(Point::new(500.0, 400.0)), CursorHint::Crosshair);
    assert!(ed.handle(PointerEvent::Down(Point::new(500.0, 400.0))));
    ed.handle(PointerEvent::Move(Point::new(450.0, 380.0)));
    ed.handle(PointerEvent::Move(Point::new(400.0, 300.0)));
    let s = selection(&ed);
    assert_eq!((s.width, s.height), (-100.0, -100.0));

    ed.handle(PointerEvent::Up(Point::new(400.0, 300.0)));
    let s = selection(&ed);
    assert_eq!((s.x, s.y, s.width, s.height), (400.0, 300.0, 100.0, 100.0));
}

#[test]
fn click_without_drag_selects_minimum_rect() {
    let mut b = rect_billboard(100.0, 100.0, 50.0, 50.0);
    let mut ed = QuadEditor::new(canvas());
    ed.start_rect(Some(&b)).unwrap();

    ed.handle(PointerEvent::Down(Point::new(500.0, 400.0)));
    ed.handle(PointerEvent::Up(Point::new(500.0, 400.0)));
    let s = selection(&ed);
    assert_eq!((s.x, s.y, s.width, s.height), (500.0, 400.0, 10.0, 10.0));

    let q = ed.confirm(&mut b).unwrap();
    assert_eq!(q.top_left, Point::new(500.0, 400.0));
    assert_eq!(q.bottom_right, Point::new(510.0, 410.0));
    assert!(ed.is_idle());
}

#[test]
fn small_drag_is_floored_from_its_anchor() {
    let b = rect_billboard(100.0, 100.0, 50.0, 50.0);
    let mut ed = QuadEditor::new(canvas());
    ed.start_rect(Some(&b)).unwrap();

    ed.handle(PointerEvent::Down(Point::new(500.0, 400.0)));
    ed.handle(PointerEvent::Move(Point::new(503.0, 402.0)));
    ed.handle(PointerEvent::Up(Point::new(503.0, 402.0)));
    let s = selection(&ed);
    assert_eq!((s.x, s.y, s.width, s.height), (500.0, 400.0, 10.0, 10.0));

    // Dragging up and left floors toward the pointer side of the anchor.
    ed.handle(PointerEvent::Down(Point::new(300.0, 200.0)));
    ed.handle(PointerEvent::Move(Point::new(296.0, 199.0)));
    ed.handle(PointerEvent::Up(Point::new(296.0, 199.0)));
    let s = selection(&ed);
    assert_eq!((s.x, s.y, s.width, s.height), (290.0, 190.0, 10.0, 10.0));
}

#[test]
fn perspective_drag_moves_only_that_corner() {
    let mut b = perspective_billboard();
    let before = b.bounds;
    let mut ed = QuadEditor::new(canvas());
    ed.start_perspective(Some(&b)).unwrap();

    assert!(ed.handle(PointerEvent::Down(Point::new(400.0, 400.0))));
    assert_eq!(ed.cursor_at(Point::new(0.0, 0.0)), CursorHint::Pointer);
    ed.handle(PointerEvent::Move(Point::new(450.0, 380.0)));
    ed.handle(PointerEvent::Up(Point::new(450.0, 380.0)));
    let q = ed.confirm(&mut b).unwrap();

    assert_eq!(q.bottom_right, Point::new(450.0, 380.0));
    assert_eq!(q.top_left, Point::new(100.0, 100.0));
    assert_eq!(q.top_right, Point::new(400.0, 120.0));
    assert_eq!(q.bottom_left, Point::new(90.0, 400.0));
    assert!(b.bounds.width() > before.width());
    assert_eq!(b.bounds, Rect::new(90.0, 100.0, 450.0, 400.0));
}

#[test]
fn perspective_drag_far_outside_is_clamped_to_margin() {
    let mut b = perspective_billboard();
    let mut ed = QuadEditor::new(canvas());
    ed.start_perspective(Some(&b)).unwrap();

    ed.handle(PointerEvent::Down(Point::new(405.0, 125.0)));
    ed.handle(PointerEvent::Move(Point::new(5000.0, -300.0)));
    match ed.working_quad() {
        Some(q) => assert_eq!(q.top_right, Point::new(790.0, 10.0)),
        None => panic!("expected working quad"),
    }
    ed.handle(PointerEvent::Up(Point::new(5000.0, -300.0)));
    let q = ed.confirm(&mut b).unwrap();
    assert_eq!(q.top_right.x, 790.0);
}

#[test]
fn drag_keeps_fractional_precision_until_commit() {
    let mut b = perspective_billboard();
    let mut ed = QuadEditor::new(canvas());
    ed.start_perspective(Some(&b)).unwrap();
    ed.handle(PointerEvent::Down(Point::new(100.0, 100.0)));
    ed.handle(PointerEvent::Move(Point::new(120.4, 130.6)));
    assert_eq!(
        ed.working_quad().map(|q| q.top_left),
        Some(Point::new(120.4, 130.6))
    );
    let q = ed.confirm(&mut b).unwrap();
    assert_eq!(q.top_left, Point::new(120.0, 131.0));
}

#[test]
fn magnifier_follows_dragged_corner_and_stays_inside() {
    let b = perspective_billboard();
    let mut ed = QuadEditor::new(canvas());
    ed.start_perspective(Some(&b)).unwrap();
    assert!(ed.magnifier().is_none());

    ed.handle(PointerEvent::Down(Point::new(100.0, 100.0)));
    let m = ed.magnifier().unwrap();
    assert_eq!(m.corner, Corner::TopLeft);
    assert_eq!(m.center, Point::new(200.0, 90.0));
    assert_eq!(m.radius, 80.0);
    assert!((m.source.width() - 160.0 / 3.0).abs() < 1e-9);
    assert!((m.source.center() - Point::new(100.0, 100.0)).hypot() < 1e-9);

    ed.handle(PointerEvent::Up(Point::new(100.0, 100.0)));
    assert!(ed.magnifier().is_none());
}

#[test]
fn cancel_discards_working_state() {
    let mut b = perspective_billboard();
    let original = b.clone();
    let mut ed = QuadEditor::new(canvas());
    ed.start_perspective(Some(&b)).unwrap();
    ed.handle(PointerEvent::Down(Point::new(100.0, 100.0)));
    ed.handle(PointerEvent::Move(Point::new(300.0, 300.0)));
    ed.cancel();
    assert!(ed.is_idle());
    assert!(ed.confirm(&mut b).is_err());
    assert_eq!(b, original);
}

#[test]
fn start_requires_idle() {
    let mut ed = QuadEditor::new(canvas());
    ed.start_rect(None).unwrap();
    assert!(matches!(
        ed.start_perspective(None),
        Err(BillboardError::Validation(_))
    ));
}

#[test]
fn degenerate_confirm_keeps_editing() {
    let mut b = perspective_billboard();
    let original = b.clone();
    let mut ed = QuadEditor::new(canvas());
    ed.start_perspective(Some(&b)).unwrap();
    let target = Point::new(400.0, 400.0);
    for from in [
        Point::new(100.0, 100.0),
        Point::new(400.0, 120.0),
        Point::new(90.0, 400.0),
    ] {
        assert!(ed.handle(PointerEvent::Down(from)));
        ed.handle(PointerEvent::Move(target));
        ed.handle(PointerEvent::Up(target));
    }

    assert!(matches!(
        ed.confirm(&mut b),
        Err(BillboardError::DegenerateQuad(_))
    ));
    assert!(!ed.is_idle());
    assert_eq!(b, original);
}

#[test]
fn drag_moves_coalesce_into_one_redraw() {
    let b = perspective_billboard();
    let mut ed = QuadEditor::new(canvas());
    ed.start_perspective(Some(&b)).unwrap();
    assert!(ed.take_redraw());

    ed.handle(PointerEvent::Down(Point::new(100.0, 100.0)));
    for i in 0..20 {
        ed.handle(PointerEvent::Move(Point::new(100.0 + f64::from(i), 100.0)));
    }
    assert!(ed.redraw_pending());
    assert!(ed.take_redraw());
    assert!(!ed.take_redraw());
}
