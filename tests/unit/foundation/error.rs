use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BillboardError::invalid_image("x")
            .to_string()
            .contains("invalid image:")
    );
    assert!(
        BillboardError::degenerate_quad("x")
            .to_string()
            .contains("degenerate quad:")
    );
    assert!(
        BillboardError::missing_content("x")
            .to_string()
            .contains("missing surface content:")
    );
    assert!(
        BillboardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BillboardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BillboardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_geometry_and_image_errors_are_local() {
    assert!(BillboardError::invalid_image("x").is_local());
    assert!(BillboardError::degenerate_quad("x").is_local());
    assert!(!BillboardError::missing_content("x").is_local());
    assert!(!BillboardError::validation("x").is_local());
}
