//! Raster - the in-memory image container
//!
//! A [`Raster`] is a dense pixel grid with interleaved 8-bit samples.
//! Two formats are supported:
//!
//! - [`PixelFormat::Gray8`] - one sample per pixel (edge maps, luma)
//! - [`PixelFormat::Rgb8`] - three samples per pixel, R G B order
//!
//! # Pixel layout
//!
//! Row-major, no row padding: the sample for channel `ch` of pixel `(x, y)`
//! lives at `(y * width + x) * channels + ch`.
//!
//! Newly created rasters are zero-filled (black). The warps in
//! `artstar-transform` rely on this as their out-of-bounds fill policy.

use crate::error::{Error, Result};

/// Pixel format (samples per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit single channel
    Gray8,
    /// 8-bit three channel, R G B order
    Rgb8,
}

impl PixelFormat {
    /// Number of interleaved samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 => 3,
        }
    }
}

/// Dense 8-bit image container
///
/// # Examples
///
/// ```
/// use artstar_core::{PixelFormat, Raster};
///
/// let raster = Raster::new(640, 480, PixelFormat::Rgb8).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Raster {
    /// Create a new zero-filled (black) raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize * format.channels();
        Ok(Raster {
            width,
            height,
            format,
            data: vec![0; len],
        })
    }

    /// Create a raster from existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::InvalidParameter`] if `data` has the wrong length.
    pub fn from_data(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} does not match {}x{} {:?} ({} samples)",
                data.len(),
                width,
                height,
                format,
                expected
            )));
        }
        Ok(Raster {
            width,
            height,
            format,
            data,
        })
    }

    /// Create a new zero-filled raster with the same dimensions and format.
    pub fn template(&self) -> Self {
        Raster {
            width: self.width,
            height: self.height,
            format: self.format,
            data: vec![0; self.data.len()],
        }
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw sample data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Check if two rasters have identical width, height, and format.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height && self.format == other.format
    }

    /// Flat sample index of pixel (x, y), channel 0.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.format.channels()
    }

    /// Get a gray sample at (x, y).
    ///
    /// Returns `None` if the coordinates are out of bounds or the raster
    /// is not [`PixelFormat::Gray8`].
    pub fn get_gray(&self, x: u32, y: u32) -> Option<u8> {
        if self.format != PixelFormat::Gray8 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.offset(x, y)])
    }

    /// Get a gray sample, asserting bounds in debug builds.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `x >= width` or `y >= height`; release
    /// builds only panic when the flat index leaves the buffer, so an
    /// out-of-range `x` can otherwise alias a pixel on the next row.
    #[inline]
    pub fn gray_at(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "({x},{y}) out of bounds");
        self.data[self.offset(x, y)]
    }

    /// Set a gray sample, asserting bounds in debug builds.
    ///
    /// # Panics
    ///
    /// Same bounds behavior as [`Raster::gray_at`].
    #[inline]
    pub fn set_gray_at(&mut self, x: u32, y: u32, val: u8) {
        debug_assert!(x < self.width && y < self.height, "({x},{y}) out of bounds");
        let idx = self.offset(x, y);
        self.data[idx] = val;
    }

    /// Get an RGB pixel at (x, y).
    ///
    /// Returns `None` if the coordinates are out of bounds or the raster
    /// is not [`PixelFormat::Rgb8`].
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.format != PixelFormat::Rgb8 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.rgb_at(x, y))
    }

    /// Get an RGB pixel, asserting bounds in debug builds.
    ///
    /// # Panics
    ///
    /// Same bounds behavior as [`Raster::gray_at`].
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "({x},{y}) out of bounds");
        let idx = self.offset(x, y);
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Set an RGB pixel, asserting bounds in debug builds.
    ///
    /// # Panics
    ///
    /// Same bounds behavior as [`Raster::gray_at`].
    #[inline]
    pub fn set_rgb_at(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        debug_assert!(x < self.width && y < self.height, "({x},{y}) out of bounds");
        let idx = self.offset(x, y);
        self.data[idx] = r;
        self.data[idx + 1] = g;
        self.data[idx + 2] = b;
    }
}
