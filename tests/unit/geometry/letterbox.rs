use super::*;

#[test]
fn equal_aspects_cover_fully() {
    for a in [0.5, 1.0, 16.0 / 9.0, 3.2] {
        let f = fit(a, a).unwrap();
        assert!(f.is_full_coverage());
        assert_eq!(f.offset_x_frac, 0.0);
        assert_eq!(f.offset_y_frac, 0.0);
    }
}

#[test]
fn wide_source_letterboxes_top_and_bottom() {
    let f = fit(3.0, 1.0).unwrap();
    assert_eq!(f.render_width_frac, 1.0);
    assert_eq!(f.offset_x_frac, 0.0);
    assert!(f.offset_y_frac > 0.0);
    assert!(f.render_height_frac < 1.0);
}

#[test]
fn narrow_source_letterboxes_sides() {
    let f = fit(0.5, 2.0).unwrap();
    assert_eq!(f.render_height_frac, 1.0);
    assert_eq!(f.offset_y_frac, 0.0);
    assert!(f.offset_x_frac > 0.0);
    assert_eq!(f.render_width_frac, 0.25);
    assert_eq!(f.offset_x_frac, 0.375);
}

#[test]
fn banner_2_to_1_into_portrait_billboard() {
    let banner = aspect_ratio(600.0, 300.0).unwrap();
    let billboard = aspect_ratio(300.0, 600.0).unwrap();
    let f = fit(banner, billboard).unwrap();
    assert_eq!(f.render_width_frac, 1.0);
    assert_eq!(f.render_height_frac, 0.25);
    assert_eq!(f.offset_y_frac, 0.375);

    let px = f.placement(300.0, 600.0);
    assert_eq!(px, Rect::new(0.0, 225.0, 300.0, 375.0));
}

#[test]
fn zero_or_invalid_aspects_fail_fast() {
    assert!(matches!(
        aspect_ratio(0.0, 10.0),
        Err(BillboardError::InvalidImage(_))
    ));
    assert!(aspect_ratio(10.0, 0.0).is_err());
    assert!(matches!(fit(0.0, 1.0), Err(BillboardError::InvalidImage(_))));
    assert!(fit(1.0, f64::INFINITY).is_err());
    assert!(fit(f64::NAN, 1.0).is_err());
    assert!(fit(-2.0, 1.0).is_err());
}
