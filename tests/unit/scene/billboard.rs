use super::*;
use crate::foundation::core::Point;

#[test]
fn default_quad_is_capped_and_centred() {
    let q = default_quad(Canvas::new(1920, 1080));
    assert_eq!(q.top_left, Point::new(810.0, 340.0));
    assert_eq!(q.bottom_right, Point::new(1110.0, 740.0));

    let small = default_quad(Canvas::new(200, 100));
    assert_eq!(small.top_left, Point::new(60.0, 25.0));
    assert_eq!(small.bottom_right, Point::new(140.0, 75.0));
}

#[test]
fn commit_keeps_bounds_in_sync() {
    let mut b = Billboard::with_default_quad(1u64, Canvas::new(800, 600));
    let q = Quad::new(
        Point::new(100.0, 100.0),
        Point::new(400.0, 120.0),
        Point::new(90.0, 400.0),
        Point::new(450.0, 380.0),
    );
    b.commit(q);
    assert_eq!(b.perspective, q);
    assert_eq!(b.bounds, Rect::new(90.0, 100.0, 450.0, 400.0));
}

#[test]
fn id_serializes_untagged() {
    assert_eq!(serde_json::to_string(&BillboardId::from(3u64)).unwrap(), "3");
    let id: BillboardId = serde_json::from_str("\"main-left\"").unwrap();
    assert_eq!(id, BillboardId::from("main-left"));
    assert_eq!(id.to_string(), "main-left");
}
