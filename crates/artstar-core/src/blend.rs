//! Weighted-sum blending
//!
//! The compositing primitive of the render pipeline: a per-pixel weighted
//! sum of two rasters with an additive bias, saturated to [0, 255] per
//! channel. Which raster goes first and at what weight is policy decided
//! by the session layer, not here.

use crate::error::{Error, Result};
use crate::raster::Raster;

/// Blend two rasters: `out = clamp(a * weight_a + b * weight_b + bias)`.
///
/// # Arguments
///
/// * `a` - First operand
/// * `b` - Second operand (must match `a` in size and format)
/// * `weight_a` - Scalar multiplier for `a`
/// * `weight_b` - Scalar multiplier for `b`
/// * `bias` - Additive constant applied per sample
///
/// # Errors
///
/// Returns [`Error::IncompatibleSizes`] when dimensions differ and
/// [`Error::FormatMismatch`] when pixel formats differ.
pub fn blend_weighted(
    a: &Raster,
    b: &Raster,
    weight_a: f32,
    weight_b: f32,
    bias: f32,
) -> Result<Raster> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(Error::IncompatibleSizes(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ));
    }
    if a.format() != b.format() {
        return Err(Error::FormatMismatch(a.format(), b.format()));
    }

    let mut out = a.template();
    let dst = out.data_mut();
    for (i, (&sa, &sb)) in a.data().iter().zip(b.data().iter()).enumerate() {
        let v = sa as f32 * weight_a + sb as f32 * weight_b + bias;
        dst[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelFormat;

    fn solid(w: u32, h: u32, val: u8) -> Raster {
        let mut r = Raster::new(w, h, PixelFormat::Rgb8).unwrap();
        r.data_mut().fill(val);
        r
    }

    #[test]
    fn test_equal_weights_average() {
        let a = solid(4, 4, 100);
        let b = solid(4, 4, 200);
        let out = blend_weighted(&a, &b, 0.5, 0.5, 0.0).unwrap();
        assert!(out.data().iter().all(|&s| s == 150));
    }

    #[test]
    fn test_saturates_at_255() {
        let a = solid(2, 2, 200);
        let b = solid(2, 2, 200);
        let out = blend_weighted(&a, &b, 1.0, 0.5, 0.0).unwrap();
        assert!(out.data().iter().all(|&s| s == 255));
    }

    #[test]
    fn test_negative_bias_floors_at_zero() {
        let a = solid(2, 2, 10);
        let b = solid(2, 2, 0);
        let out = blend_weighted(&a, &b, 1.0, 1.0, -50.0).unwrap();
        assert!(out.data().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_size_mismatch() {
        let a = solid(2, 2, 0);
        let b = solid(3, 2, 0);
        assert!(matches!(
            blend_weighted(&a, &b, 0.5, 0.5, 0.0),
            Err(Error::IncompatibleSizes(..))
        ));
    }

    #[test]
    fn test_format_mismatch() {
        let a = solid(2, 2, 0);
        let b = Raster::new(2, 2, PixelFormat::Gray8).unwrap();
        assert!(matches!(
            blend_weighted(&a, &b, 0.5, 0.5, 0.0),
            Err(Error::FormatMismatch(..))
        ));
    }
}
