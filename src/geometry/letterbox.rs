//! Aspect-preserving fit of a source image into a target box.

use crate::{
    foundation::core::Rect,
    foundation::error::{BillboardError, BillboardResult},
};

/// Placement of a letterboxed source inside a target box, normalized to that box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterboxFit {
    /// Rendered source width as a fraction of the target width.
    pub render_width_frac: f64,
    /// Rendered source height as a fraction of the target height.
    pub render_height_frac: f64,
    /// Left padding as a fraction of the target width.
    pub offset_x_frac: f64,
    /// Top padding as a fraction of the target height.
    pub offset_y_frac: f64,
}

impl LetterboxFit {
    /// The source covers the whole target (no padding on either axis).
    pub fn is_full_coverage(&self) -> bool {
        self.render_width_frac == 1.0 && self.render_height_frac == 1.0
    }

    /// Pixel rectangle of the rendered source inside a `width × height` buffer.
    pub fn placement(&self, width: f64, height: f64) -> Rect {
        let x0 = self.offset_x_frac * width;
        let y0 = self.offset_y_frac * height;
        Rect::new(
            x0,
            y0,
            x0 + self.render_width_frac * width,
            y0 + self.render_height_frac * height,
        )
    }
}

/// Width / height, failing with [`BillboardError::InvalidImage`] for zero or non-finite sizes.
pub fn aspect_ratio(width: f64, height: f64) -> BillboardResult<f64> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(BillboardError::invalid_image(format!(
            "cannot take aspect ratio of {width}x{height}"
        )));
    }
    Ok(width / height)
}

/// Fit a source of `source_aspect` into a target of `target_aspect`, centered.
///
/// A relatively wider source spans the full width and is letterboxed top and bottom;
/// otherwise it spans the full height and is pillarboxed left and right.
pub fn fit(source_aspect: f64, target_aspect: f64) -> BillboardResult<LetterboxFit> {
    for (name, a) in [("source", source_aspect), ("target", target_aspect)] {
        if !a.is_finite() || a <= 0.0 {
            return Err(BillboardError::invalid_image(format!(
                "{name} aspect ratio must be finite and > 0 (got {a})"
            )));
        }
    }

    if source_aspect > target_aspect {
        let render_height_frac = target_aspect / source_aspect;
        Ok(LetterboxFit {
            render_width_frac: 1.0,
            render_height_frac,
            offset_x_frac: 0.0,
            offset_y_frac: (1.0 - render_height_frac) / 2.0,
        })
    } else {
        let render_width_frac = source_aspect / target_aspect;
        Ok(LetterboxFit {
            render_width_frac,
            render_height_frac: 1.0,
            offset_x_frac: (1.0 - render_width_frac) / 2.0,
            offset_y_frac: 0.0,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/letterbox.rs"]
mod tests;
