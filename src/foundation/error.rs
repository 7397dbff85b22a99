/// Convenience result type used across the compositor.
pub type BillboardResult<T> = Result<T, BillboardError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum BillboardError {
    /// A source image (or aspect ratio derived from one) cannot be fitted.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A quadrilateral is non-finite, zero-area, self-intersecting or non-convex.
    #[error("degenerate quad: {0}")]
    DegenerateQuad(String),

    /// Compositing was requested before the base screenshot was attached.
    #[error("missing surface content: {0}")]
    MissingSurfaceContent(String),

    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BillboardError {
    /// Build a [`BillboardError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build a [`BillboardError::DegenerateQuad`] value.
    pub fn degenerate_quad(msg: impl Into<String>) -> Self {
        Self::DegenerateQuad(msg.into())
    }

    /// Build a [`BillboardError::MissingSurfaceContent`] value.
    pub fn missing_content(msg: impl Into<String>) -> Self {
        Self::MissingSurfaceContent(msg.into())
    }

    /// Build a [`BillboardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BillboardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the error only affects a single billboard and rendering may continue.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidImage(_) | Self::DegenerateQuad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
