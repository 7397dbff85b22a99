use image::imageops::FilterType;

use crate::{
    assets::raster::RasterImage,
    foundation::core::Rgba8,
    foundation::error::{BillboardError, BillboardResult},
    foundation::math::mul_div255_u8,
    geometry::letterbox::{aspect_ratio, fit},
};

/// Render `banner` letterboxed into a fresh `width × height` buffer filled with `padding`.
///
/// The banner is resampled with a Catmull-Rom filter and composited over the padding, so
/// an opaque padding colour yields an opaque buffer.
pub(crate) fn letterbox_buffer(
    banner: &RasterImage,
    width: u32,
    height: u32,
    padding: Rgba8,
) -> BillboardResult<RasterImage> {
    let layout = fit(
        banner.aspect()?,
        aspect_ratio(f64::from(width), f64::from(height))?,
    )?;
    let place = layout.placement(f64::from(width), f64::from(height));

    let x0 = (place.x0.round().max(0.0) as u32).min(width - 1);
    let y0 = (place.y0.round().max(0.0) as u32).min(height - 1);
    let rw = (place.width().round() as u32).clamp(1, width - x0);
    let rh = (place.height().round() as u32).clamp(1, height - y0);

    let scaled = if rw == banner.width && rh == banner.height {
        banner.to_premul_buffer()?
    } else {
        image::imageops::resize(&banner.to_premul_buffer()?, rw, rh, FilterType::CatmullRom)
    };

    let pad = padding.to_premul_array();
    let mut data = pad.repeat(width as usize * height as usize);
    for (x, y, px) in scaled.enumerate_pixels() {
        let i = ((y0 + y) as usize * width as usize + (x0 + x) as usize) * 4;
        let dst = data
            .get_mut(i..i + 4)
            .ok_or_else(|| BillboardError::validation("letterbox placement out of bounds"))?;
        let inv_a = 255 - u16::from(px.0[3]);
        for c in 0..4 {
            let under = mul_div255_u8(u16::from(pad[c]), inv_a);
            dst[c] = px.0[c].saturating_add(under);
        }
    }

    RasterImage::new(width, height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/render/letterbox.rs"]
mod tests;
