//! Affine transformations
//!
//! An affine transformation is represented as six coefficients:
//!
//! ```text
//! | a  b  tx |
//! | c  d  ty |
//! | 0  0  1  |
//! ```
//!
//! with the forward mapping:
//!
//! ```text
//! x' = a*x + b*y + tx
//! y' = c*x + d*y + ty
//! ```
//!
//! The matrix shape the session builds is rotation-plus-translation with
//! every coefficient (translation included) multiplied by a zoom factor.
//! Scaling the translation terms with the zoom is intentional, inherited
//! behavior: larger zoom means larger apparent shifts.

use crate::error::{TransformError, TransformResult};
use crate::sampling::sample_rgb_bilinear;
use artstar_core::{PixelFormat, Raster};

/// Determinant magnitude below which a matrix counts as singular
const MIN_DETERMINANT: f32 = 1e-6;

/// A 2D point with floating-point coordinates
///
/// Used as quad corners for the projective transformation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D affine transformation matrix (6 coefficients)
///
/// Coefficients are stored as `[a, b, tx, c, d, ty]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineMatrix {
    coeffs: [f32; 6],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// Create the identity transformation.
    pub fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Create from raw coefficients `[a, b, tx, c, d, ty]`.
    pub fn from_coeffs(coeffs: [f32; 6]) -> Self {
        Self { coeffs }
    }

    /// Get the raw coefficients.
    pub fn coeffs(&self) -> &[f32; 6] {
        &self.coeffs
    }

    /// Rotation about the origin composed with a translation.
    ///
    /// `degrees` is counter-clockwise positive (standard 2D rotation);
    /// `tx`, `ty` are pixel offsets.
    pub fn rotation_translation(degrees: f32, tx: f32, ty: f32) -> Self {
        let rad = degrees.to_radians();
        let (sin_a, cos_a) = rad.sin_cos();
        Self {
            coeffs: [cos_a, -sin_a, tx, sin_a, cos_a, ty],
        }
    }

    /// Multiply every coefficient by `factor`.
    ///
    /// This deliberately scales the translation column too; the session
    /// passes `1 + zoom` here, so zoom amplifies translation as well.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut coeffs = self.coeffs;
        for c in &mut coeffs {
            *c *= factor;
        }
        Self { coeffs }
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f32 {
        let [a, b, _, c, d, _] = self.coeffs;
        a * d - b * c
    }

    /// Compute the inverse transformation.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] when the linear part is
    /// not invertible (the zoom factor `1 + zoom` reaching 0 collapses
    /// every coefficient).
    pub fn inverse(&self) -> TransformResult<Self> {
        let [a, b, tx, c, d, ty] = self.coeffs;
        let det = self.determinant();
        if det.abs() < MIN_DETERMINANT {
            return Err(TransformError::SingularMatrix);
        }
        let ia = d / det;
        let ib = -b / det;
        let ic = -c / det;
        let id = a / det;
        Ok(Self::from_coeffs([
            ia,
            ib,
            -(ia * tx + ib * ty),
            ic,
            id,
            -(ic * tx + id * ty),
        ]))
    }

    /// Transform a point through this matrix (forward mapping).
    pub fn transform_point(&self, pt: Point) -> Point {
        let [a, b, tx, c, d, ty] = self.coeffs;
        Point::new(a * pt.x + b * pt.y + tx, c * pt.x + d * pt.y + ty)
    }
}

/// Apply an affine transformation to an RGB raster.
///
/// `matrix` is the forward (source-to-destination) mapping; sampling is
/// done destination-driven through its inverse with bilinear
/// interpolation. The output has the same dimensions as the input;
/// destination pixels with no source coverage stay black.
///
/// A singular matrix (the `zoom = -1` degenerate case) yields an all-black
/// frame rather than an error: the interactive loop must keep rendering
/// for every parameter state the user can reach.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedFormat`] for non-RGB input.
pub fn warp_affine(src: &Raster, matrix: &AffineMatrix) -> TransformResult<Raster> {
    if src.format() != PixelFormat::Rgb8 {
        return Err(TransformError::UnsupportedFormat(src.format()));
    }

    let mut dst = src.template();
    let inv = match matrix.inverse() {
        Ok(inv) => inv,
        Err(TransformError::SingularMatrix) => return Ok(dst),
        Err(e) => return Err(e),
    };

    let [ia, ib, itx, ic, id, ity] = *inv.coeffs();
    for dy in 0..dst.height() {
        for dx in 0..dst.width() {
            let sx = ia * dx as f32 + ib * dy as f32 + itx;
            let sy = ic * dx as f32 + id * dy as f32 + ity;
            if let Some((r, g, b)) = sample_rgb_bilinear(src, sx, sy) {
                dst.set_rgb_at(dx, dy, r, g, b);
            }
        }
    }
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Matrix algebra tests
    // ========================================================================

    #[test]
    fn test_identity_maps_points_to_themselves() {
        let m = AffineMatrix::identity();
        let p = Point::new(12.5, -3.0);
        assert_eq!(m.transform_point(p), p);
    }

    #[test]
    fn test_rotation_90_ccw() {
        let m = AffineMatrix::rotation_translation(90.0, 0.0, 0.0);
        let p = m.transform_point(Point::new(1.0, 0.0));
        assert!((p.x - 0.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scaled_multiplies_translation_too() {
        // tx=20 with factor 1.5 must become 30: the zoom/translation
        // coupling is part of the contract, not an accident.
        let m = AffineMatrix::rotation_translation(0.0, 20.0, 0.0).scaled(1.5);
        assert!((m.coeffs()[2] - 30.0).abs() < 1e-5);
        assert!((m.coeffs()[0] - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = AffineMatrix::rotation_translation(30.0, 15.0, -7.0).scaled(1.2);
        let inv = m.inverse().unwrap();
        let p = Point::new(40.0, 25.0);
        let q = inv.transform_point(m.transform_point(p));
        assert!((q.x - p.x).abs() < 1e-3);
        assert!((q.y - p.y).abs() < 1e-3);
    }

    #[test]
    fn test_zero_scale_is_singular() {
        let m = AffineMatrix::rotation_translation(10.0, 5.0, 5.0).scaled(0.0);
        assert!(matches!(m.inverse(), Err(TransformError::SingularMatrix)));
    }

    // ========================================================================
    // Warp tests
    // ========================================================================

    fn marker_raster(w: u32, h: u32, x: u32, y: u32) -> Raster {
        let mut r = Raster::new(w, h, PixelFormat::Rgb8).unwrap();
        r.set_rgb_at(x, y, 255, 0, 0);
        r
    }

    #[test]
    fn test_warp_identity_is_noop() {
        let src = marker_raster(16, 16, 5, 9);
        let out = warp_affine(&src, &AffineMatrix::identity()).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_warp_pure_translation() {
        let src = marker_raster(32, 32, 4, 6);
        let m = AffineMatrix::rotation_translation(0.0, 10.0, 3.0);
        let out = warp_affine(&src, &m).unwrap();
        assert_eq!(out.rgb_at(14, 9), (255, 0, 0));
        assert_eq!(out.rgb_at(4, 6), (0, 0, 0));
    }

    #[test]
    fn test_warp_zoom_scales_translation() {
        // tx=20, zoom=0.5: marker at (4,4) lands at (4*1.5+30, 4*1.5) = (36, 6).
        let src = marker_raster(64, 64, 4, 4);
        let m = AffineMatrix::rotation_translation(0.0, 20.0, 0.0).scaled(1.5);
        let out = warp_affine(&src, &m).unwrap();
        let (r, _, _) = out.rgb_at(36, 6);
        assert!(r > 0, "marker should land at the zoom-scaled translation");
    }

    #[test]
    fn test_warp_singular_matrix_is_black() {
        let mut src = marker_raster(8, 8, 2, 2);
        src.data_mut().fill(200);
        let m = AffineMatrix::identity().scaled(0.0);
        let out = warp_affine(&src, &m).unwrap();
        assert!(out.data().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_warp_rejects_gray() {
        let src = Raster::new(8, 8, PixelFormat::Gray8).unwrap();
        assert!(matches!(
            warp_affine(&src, &AffineMatrix::identity()),
            Err(TransformError::UnsupportedFormat(_))
        ));
    }
}
