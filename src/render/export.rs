use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::decode::unpremultiply_rgba8_in_place,
    foundation::error::{BillboardError, BillboardResult},
    render::FrameRGBA,
};

/// Encode a snapshot as PNG, converting premultiplied pixels back to straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> BillboardResult<Vec<u8>> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data).ok_or_else(|| {
        BillboardError::validation(format!(
            "frame buffer does not match {}x{}",
            frame.width, frame.height
        ))
    })?;

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
