//! Pixel format conversions
//!
//! The render pipeline works on RGB rasters; the edge filter works on
//! luma. These conversions bridge the two: `to_gray` for filter input,
//! `to_rgb` to widen an edge map back to three channels so it stays
//! channel-compatible with blending.

use crate::error::Result;
use crate::raster::{PixelFormat, Raster};

/// ITU-R BT.601 luma weights (0.299 R + 0.587 G + 0.114 B), fixed-point
/// with 15 fractional bits.
const LUMA_R: u32 = 9798; // 0.299 * 32768
const LUMA_G: u32 = 19235; // 0.587 * 32768
const LUMA_B: u32 = 3735; // 0.114 * 32768

/// Compute the luma of one RGB pixel.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + (1 << 14)) >> 15) as u8
}

/// Convert a raster to 8-bit grayscale.
///
/// RGB input is reduced with BT.601 luma weights; gray input is cloned.
pub fn to_gray(raster: &Raster) -> Result<Raster> {
    match raster.format() {
        PixelFormat::Gray8 => Ok(raster.clone()),
        PixelFormat::Rgb8 => {
            let mut out = Raster::new(raster.width(), raster.height(), PixelFormat::Gray8)?;
            for y in 0..raster.height() {
                for x in 0..raster.width() {
                    let (r, g, b) = raster.rgb_at(x, y);
                    out.set_gray_at(x, y, luma(r, g, b));
                }
            }
            Ok(out)
        }
    }
}

/// Convert a raster to RGB.
///
/// Gray input is widened by replicating the sample into all three
/// channels; RGB input is cloned.
pub fn to_rgb(raster: &Raster) -> Result<Raster> {
    match raster.format() {
        PixelFormat::Rgb8 => Ok(raster.clone()),
        PixelFormat::Gray8 => {
            let mut out = Raster::new(raster.width(), raster.height(), PixelFormat::Rgb8)?;
            for y in 0..raster.height() {
                for x in 0..raster.width() {
                    let v = raster.gray_at(x, y);
                    out.set_rgb_at(x, y, v, v, v);
                }
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
    }

    #[test]
    fn test_luma_green_dominates() {
        assert!(luma(0, 255, 0) > luma(255, 0, 0));
        assert!(luma(255, 0, 0) > luma(0, 0, 255));
    }

    #[test]
    fn test_to_gray_and_widen() {
        let mut rgb = Raster::new(2, 1, PixelFormat::Rgb8).unwrap();
        rgb.set_rgb_at(0, 0, 100, 100, 100);
        rgb.set_rgb_at(1, 0, 0, 0, 0);

        let gray = to_gray(&rgb).unwrap();
        assert_eq!(gray.format(), PixelFormat::Gray8);
        assert_eq!(gray.gray_at(0, 0), 100);
        assert_eq!(gray.gray_at(1, 0), 0);

        let widened = to_rgb(&gray).unwrap();
        assert_eq!(widened.format(), PixelFormat::Rgb8);
        assert_eq!(widened.rgb_at(0, 0), (100, 100, 100));
    }

    #[test]
    fn test_same_format_is_identity() {
        let rgb = Raster::new(3, 3, PixelFormat::Rgb8).unwrap();
        assert_eq!(to_rgb(&rgb).unwrap(), rgb);
        let gray = Raster::new(3, 3, PixelFormat::Gray8).unwrap();
        assert_eq!(to_gray(&gray).unwrap(), gray);
    }
}
