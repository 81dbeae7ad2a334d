//! Error types for paintctx.

use thiserror::Error;

/// Result type alias using ContextError.
pub type ContextResult<T> = Result<T, ContextError>;

/// Errors reported by the drawing context and its resources.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The context is not attached to a target image.
    #[error("Invalid state: context is not attached to an image")]
    InvalidState,

    /// Invalid image dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A state value was rejected (NaN alpha, negative dash segment, ...).
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Geometry with non-finite coordinates or an out-of-bounds area.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// `restore` was called with an empty state stack.
    #[error("No saved states to restore")]
    NoStatesToRestore,

    /// The image format cannot be used for the requested operation.
    #[error("Unsupported image format: {0}")]
    InvalidFormat(String),

    /// Failed to parse color value.
    #[error("Failed to parse color: {0}")]
    ColorParseError(String),

    /// Path construction error.
    #[error("Path error: {0}")]
    PathError(String),

    /// Font loading error.
    #[error("Font error: {0}")]
    FontError(String),

    /// PNG encoding or decoding error.
    #[error("PNG error: {0}")]
    PngError(String),

    /// File system error while reading or writing images and fonts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::EncodingError> for ContextError {
    fn from(err: png::EncodingError) -> Self {
        ContextError::PngError(err.to_string())
    }
}

impl From<png::DecodingError> for ContextError {
    fn from(err: png::DecodingError) -> Self {
        ContextError::PngError(err.to_string())
    }
}
