//! Error types for artstar-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use crate::PixelFormat;
use thiserror::Error;

/// Core raster error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel format mismatch between two rasters
    #[error("pixel format mismatch: {0:?} vs {1:?}")]
    FormatMismatch(PixelFormat, PixelFormat),

    /// Incompatible raster sizes
    #[error("incompatible raster sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Operation requires a different pixel format
    #[error("unsupported pixel format for this operation: {0:?}")]
    UnsupportedFormat(PixelFormat),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core raster operations
pub type Result<T> = std::result::Result<T, Error>;
