//! Art Star core - basic raster data structures
//!
//! This crate provides the fundamental image container used throughout the
//! Art Star compositing tool:
//!
//! - [`Raster`] / [`PixelFormat`] - dense 8-bit image container
//! - [`convert`] - gray/RGB conversions (luma reduction, channel widening)
//! - [`blend_weighted`] - saturating weighted-sum compositing primitive
//!
//! Rasters are plain owned buffers; the interactive session is
//! single-threaded and clones per render pass, so no shared-ownership
//! machinery is needed.

pub mod blend;
pub mod convert;
pub mod error;
pub mod raster;

pub use blend::blend_weighted;
pub use convert::{luma, to_gray, to_rgb};
pub use error::{Error, Result};
pub use raster::{PixelFormat, Raster};
