use super::*;
use crate::foundation::core::Canvas;
use crate::render::recording::{RecordingSurface, SurfaceCall};

fn approx(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Quad {
    Quad::from_rect(Rect::new(x0, y0, x1, y1))
}

#[test]
fn defaults_match_documented_values() {
    let opts = CompositorOpts::default();
    assert_eq!(opts.grid_segments, 25);
    assert_eq!(opts.overlap, 0.5);
    assert_eq!(opts.padding, Rgba8::BLACK);
    assert!(opts.validate().is_ok());
}

#[test]
fn validate_rejects_zero_grid_and_negative_overlap() {
    let zero = CompositorOpts {
        grid_segments: 0,
        ..CompositorOpts::default()
    };
    assert!(matches!(zero.validate(), Err(BillboardError::Validation(_))));

    let neg = CompositorOpts {
        overlap: -1.0,
        ..CompositorOpts::default()
    };
    assert!(neg.validate().is_err());
}

#[test]
fn buffer_size_rounds_up_estimate() {
    let q = square(0.0, 0.0, 10.2, 4.0);
    assert_eq!(buffer_size(&q, DEFAULT_MAX_BUFFER_PIXELS).unwrap(), (11, 4));
}

#[test]
fn oversized_buffer_is_rejected_before_allocation() {
    let huge = square(0.0, 0.0, 60000.0, 60000.0);
    assert!(huge.validate().is_ok());
    assert!(matches!(
        buffer_size(&huge, DEFAULT_MAX_BUFFER_PIXELS),
        Err(BillboardError::DegenerateQuad(_))
    ));
    assert_eq!(buffer_size(&square(0.0, 0.0, 4.0, 4.0), 16).unwrap(), (4, 4));
    assert!(buffer_size(&square(0.0, 0.0, 4.0, 5.0), 16).is_err());

    let mut s = RecordingSurface::new(Canvas::new(64, 64));
    let banner = RasterImage::solid(10, 10, Rgba8::WHITE);
    let err = composite_banner(&mut s, &huge, &banner, &CompositorOpts::default()).unwrap_err();
    assert!(err.is_local());
    assert!(s.calls.is_empty());
}

#[test]
fn axis_aligned_cells_map_exactly() {
    let quad = square(10.0, 20.0, 110.0, 120.0);
    let opts = CompositorOpts {
        grid_segments: 4,
        overlap: 0.0,
        ..CompositorOpts::default()
    };
    let cells = plan_tiles(&quad, Size::new(100.0, 100.0), &opts);
    assert_eq!(cells.len(), 16);

    let cell = cells
        .iter()
        .find(|c| c.row == 1 && c.col == 2)
        .copied()
        .unwrap();
    assert_eq!(cell.src, Rect::new(50.0, 25.0, 75.0, 50.0));
    assert!(approx(cell.dst.top_left, Point::new(60.0, 45.0)));
    let far = map_through_cell(&cell, 1.0, 1.0).unwrap();
    assert!(approx(far, Point::new(85.0, 70.0)));
}

#[test]
fn overlap_widens_inner_cells_and_clamps_at_edges() {
    let quad = square(0.0, 0.0, 50.0, 50.0);
    let opts = CompositorOpts::default();
    let cells = plan_tiles(&quad, Size::new(50.0, 50.0), &opts);
    assert_eq!(cells.len(), 625);

    let first = cells[0];
    assert_eq!(first.src.x0, 0.0);
    assert_eq!(first.src.y0, 0.0);
    let last = cells[624];
    assert_eq!(last.src.x1, 50.0);
    assert_eq!(last.src.y1, 50.0);

    let inner = cells[5 * 25 + 5];
    assert!((inner.src.width() - 4.0).abs() < 1e-9);
    assert!((inner.src.height() - 4.0).abs() < 1e-9);
}

#[test]
fn rotated_rectangle_cells_land_on_interpolated_corners() {
    let quad = Quad::new(
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 100.0),
    );
    let opts = CompositorOpts {
        grid_segments: 5,
        overlap: 0.0,
        ..CompositorOpts::default()
    };
    for cell in plan_tiles(&quad, Size::new(100.0, 100.0), &opts) {
        let br = map_through_cell(&cell, 1.0, 1.0).unwrap();
        assert!((br - cell.dst.bottom_right).hypot() < 1e-6, "{cell:?}");
    }
}

#[test]
fn cell_transform_skips_zero_extent() {
    let dst = square(0.0, 0.0, 10.0, 10.0);
    assert!(cell_transform(&dst, Rect::new(5.0, 5.0, 5.0, 10.0)).is_none());
    let flat = Quad::new(
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(0.0, 10.0),
    );
    assert!(cell_transform(&flat, Rect::new(0.0, 0.0, 1.0, 1.0)).is_none());
}

#[test]
fn composite_issues_one_blit_per_cell_inside_balanced_state() {
    let mut s = RecordingSurface::new(Canvas::new(64, 64));
    let banner = RasterImage::solid(200, 100, Rgba8::opaque(255, 0, 0));
    let quad = square(8.0, 8.0, 56.0, 56.0);

    let stats = composite_banner(&mut s, &quad, &banner, &CompositorOpts::default()).unwrap();
    assert_eq!(stats.cells_drawn, 625);
    assert_eq!(stats.cells_skipped, 0);
    assert_eq!((stats.buffer_width, stats.buffer_height), (48, 48));
    assert_eq!(s.draw_image_count(), 625);
    assert_eq!(s.depth(), 0);

    assert_eq!(
        s.calls[0],
        SurfaceCall::Upload {
            width: 48,
            height: 48
        }
    );
    assert_eq!(s.calls[1], SurfaceCall::Save);
    assert!(matches!(s.calls[2], SurfaceCall::Clip { .. }));
    assert!(matches!(
        s.calls[3],
        SurfaceCall::FillPath {
            color: Rgba8::BLACK,
            ..
        }
    ));

    let saves = s.calls.iter().filter(|c| **c == SurfaceCall::Save).count();
    let restores = s.calls.iter().filter(|c| **c == SurfaceCall::Restore).count();
    assert_eq!(saves, 626);
    assert_eq!(saves, restores);
    assert_eq!(s.transform(), Affine::IDENTITY);
}

#[test]
fn each_blit_targets_origin_sized_to_its_source() {
    let mut s = RecordingSurface::new(Canvas::new(64, 64));
    let banner = RasterImage::solid(16, 16, Rgba8::WHITE);
    let quad = square(8.0, 8.0, 56.0, 56.0);
    let opts = CompositorOpts {
        grid_segments: 3,
        ..CompositorOpts::default()
    };
    composite_banner(&mut s, &quad, &banner, &opts).unwrap();

    for call in &s.calls {
        if let SurfaceCall::DrawImage { src, dst, .. } = call {
            assert_eq!(dst.origin(), Point::ORIGIN);
            assert_eq!(dst.size(), src.size());
        }
    }
}

#[test]
fn degenerate_quad_draws_nothing() {
    let mut s = RecordingSurface::new(Canvas::new(64, 64));
    let banner = RasterImage::solid(10, 10, Rgba8::WHITE);
    let p = Point::new(5.0, 5.0);
    let quad = Quad::new(p, p, p, p);
    let err = composite_banner(&mut s, &quad, &banner, &CompositorOpts::default()).unwrap_err();
    assert!(matches!(err, BillboardError::DegenerateQuad(_)));
    assert!(s.calls.is_empty());
}

#[test]
fn zero_sized_banner_draws_nothing() {
    let mut s = RecordingSurface::new(Canvas::new(64, 64));
    let banner = RasterImage::solid(0, 10, Rgba8::WHITE);
    let quad = square(8.0, 8.0, 56.0, 56.0);
    let err = composite_banner(&mut s, &quad, &banner, &CompositorOpts::default()).unwrap_err();
    assert!(matches!(err, BillboardError::InvalidImage(_)));
    assert!(s.calls.is_empty());
}
