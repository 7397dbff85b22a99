use super::*;

#[test]
fn png_round_trips_straight_alpha() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 255, 255],
        premultiplied: true,
    };
    let png = encode_png(&frame).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(back.get_pixel(1, 0).0, [0, 0, 255, 255]);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 12],
        premultiplied: false,
    };
    assert!(matches!(
        encode_png(&frame),
        Err(BillboardError::Validation(_))
    ));
}
