//! Error types for artstar-transform

use artstar_core::PixelFormat;
use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core raster error
    #[error("core error: {0}")]
    Core(#[from] artstar_core::Error),

    /// Unsupported pixel format for this operation
    #[error("unsupported pixel format: {0:?}")]
    UnsupportedFormat(PixelFormat),

    /// Singular matrix (non-invertible)
    #[error("singular transformation matrix")]
    SingularMatrix,

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
