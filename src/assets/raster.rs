use std::sync::Arc;

use crate::{
    foundation::core::{Rgba8, Size},
    foundation::error::{BillboardError, BillboardResult},
    geometry::letterbox::aspect_ratio,
};

/// Decoded raster in premultiplied RGBA8, row-major, tightly packed.
///
/// Pixel storage is shared, so cloning a banner or base screenshot is cheap.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` premultiplied bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap premultiplied RGBA8 bytes, checking the buffer length.
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> BillboardResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| BillboardError::validation("raster dimensions overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(BillboardError::validation(format!(
                "raster byte length mismatch: expected {expected}, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Uniformly coloured raster.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Self {
        let px = color.to_premul_array();
        let data = px.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// Pixel size as floating point.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Width / height; [`BillboardError::InvalidImage`] for zero-sized images.
    pub fn aspect(&self) -> BillboardResult<f64> {
        aspect_ratio(f64::from(self.width), f64::from(self.height))
    }

    /// Premultiplied pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Borrow the pixels as an `image` buffer (channels stay premultiplied).
    pub(crate) fn to_premul_buffer(&self) -> BillboardResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.rgba8_premul.as_ref().clone())
            .ok_or_else(|| BillboardError::validation("raster buffer does not match dimensions"))
    }
}
