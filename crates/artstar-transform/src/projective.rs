//! Projective (perspective) transformations
//!
//! A projective transformation maps one quadrilateral onto another via
//! eight coefficients:
//!
//! ```text
//! x' = (a*x + b*y + c) / (g*x + h*y + 1)
//! y' = (d*x + e*y + f) / (g*x + h*y + 1)
//! ```
//!
//! The session uses this for the skew effect: the image rectangle is
//! mapped onto a symmetric trapezoid ([`skew_quad`]), which foreshortens
//! the top or bottom edge like a plane tilting away from the viewer.

use crate::error::{TransformError, TransformResult};
use crate::sampling::sample_rgb_bilinear;
use crate::Point;
use artstar_core::{PixelFormat, Raster};

/// Pivot magnitude below which the correspondence system is singular
const MIN_PIVOT: f32 = 1e-8;

/// Projective transformation coefficients (8 values)
///
/// Stored as `[a, b, c, d, e, f, g, h]` of the rational mapping above.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectiveCoeffs {
    coeffs: [f32; 8],
}

impl Default for ProjectiveCoeffs {
    fn default() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        }
    }
}

impl ProjectiveCoeffs {
    /// Create from raw coefficients `[a, b, c, d, e, f, g, h]`.
    pub fn from_coeffs(coeffs: [f32; 8]) -> Self {
        Self { coeffs }
    }

    /// Get the raw coefficients.
    pub fn coeffs(&self) -> &[f32; 8] {
        &self.coeffs
    }

    /// Compute the projective transform taking `from` corners onto `to`
    /// corners (4-point correspondence).
    ///
    /// Each correspondence contributes two rows of an 8x8 linear system,
    /// solved by Gauss elimination with partial pivoting.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] for degenerate quads
    /// (three collinear corners, repeated corners).
    pub fn from_quads(from: [Point; 4], to: [Point; 4]) -> TransformResult<Self> {
        // Rows: [x, y, 1, 0, 0, 0, -x*u, -y*u | u]
        //       [0, 0, 0, x, y, 1, -x*v, -y*v | v]
        let mut m = [[0.0f32; 9]; 8];
        for i in 0..4 {
            let Point { x, y } = from[i];
            let Point { x: u, y: v } = to[i];
            m[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -x * u, -y * u, u];
            m[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -x * v, -y * v, v];
        }

        let solution = solve_linear_8(&mut m)?;
        Ok(Self { coeffs: solution })
    }

    /// Transform a point through this mapping.
    ///
    /// Points on the line `g*x + h*y + 1 = 0` (the horizon of the
    /// mapping) have no finite image; `None` is returned for those.
    pub fn transform_point(&self, pt: Point) -> Option<Point> {
        let [a, b, c, d, e, f, g, h] = self.coeffs;
        let denom = g * pt.x + h * pt.y + 1.0;
        if denom.abs() < MIN_PIVOT {
            return None;
        }
        Some(Point::new(
            (a * pt.x + b * pt.y + c) / denom,
            (d * pt.x + e * pt.y + f) / denom,
        ))
    }
}

/// Gauss elimination with partial pivoting on an 8x9 augmented system.
fn solve_linear_8(m: &mut [[f32; 9]; 8]) -> TransformResult<[f32; 8]> {
    for col in 0..8 {
        // Pivot: largest magnitude in this column at or below the diagonal
        let pivot_row = (col..8)
            .max_by(|&r1, &r2| m[r1][col].abs().total_cmp(&m[r2][col].abs()))
            .unwrap_or(col);
        if m[pivot_row][col].abs() < MIN_PIVOT {
            return Err(TransformError::SingularMatrix);
        }
        m.swap(col, pivot_row);

        let pivot = m[col][col];
        for row in (col + 1)..8 {
            let factor = m[row][col] / pivot;
            for k in col..9 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    // Back substitution
    let mut x = [0.0f32; 8];
    for row in (0..8).rev() {
        let mut acc = m[row][8];
        for k in (row + 1)..8 {
            acc -= m[row][k] * x[k];
        }
        x[row] = acc / m[row][row];
    }
    Ok(x)
}

/// Corner quad of a `width` x `height` rectangle, in the order
/// top-left, top-right, bottom-right, bottom-left.
pub fn rect_quad(width: u32, height: u32) -> [Point; 4] {
    let w = width as f32;
    let h = height as f32;
    [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]
}

/// Destination trapezoid for the skew effect.
///
/// `offset = |round(width * tan(skew) / 2)|`. Non-negative skew pulls the
/// two top corners inward by `offset` (top-left moves right, top-right
/// moves left) and leaves the bottom edge untouched; negative skew shrinks
/// the bottom edge symmetrically instead.
pub fn skew_quad(width: u32, height: u32, skew_degrees: f32) -> [Point; 4] {
    let w = width as f32;
    let h = height as f32;
    let offset = (w * skew_degrees.to_radians().tan() / 2.0).round().abs();

    if skew_degrees >= 0.0 {
        [
            Point::new(offset, 0.0),
            Point::new(w - offset, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ]
    } else {
        [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w - offset, h),
            Point::new(offset, h),
        ]
    }
}

/// Apply the projective transform taking `src_quad` onto `dst_quad` to an
/// RGB raster.
///
/// Output dimensions equal input dimensions; uncovered destination pixels
/// stay black. Sampling is destination-driven: the inverse correspondence
/// (`dst_quad` onto `src_quad`) is solved and followed with bilinear
/// interpolation. Identical quads short-circuit to a clone.
///
/// Degenerate quads (a skew of exactly 45 degrees collapses the
/// trapezoid's short edge to a point) yield an all-black frame rather
/// than an error, matching [`warp_affine`] on a singular matrix: every
/// parameter state the session can reach must keep rendering.
///
/// [`warp_affine`]: crate::affine::warp_affine
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedFormat`] for non-RGB input.
pub fn warp_projective(
    src: &Raster,
    src_quad: [Point; 4],
    dst_quad: [Point; 4],
) -> TransformResult<Raster> {
    if src.format() != PixelFormat::Rgb8 {
        return Err(TransformError::UnsupportedFormat(src.format()));
    }
    if src_quad == dst_quad {
        return Ok(src.clone());
    }

    let mut dst = src.template();
    let inverse = match ProjectiveCoeffs::from_quads(dst_quad, src_quad) {
        Ok(inverse) => inverse,
        Err(TransformError::SingularMatrix) => return Ok(dst),
        Err(e) => return Err(e),
    };

    for dy in 0..dst.height() {
        for dx in 0..dst.width() {
            let Some(p) = inverse.transform_point(Point::new(dx as f32, dy as f32)) else {
                continue;
            };
            if let Some((r, g, b)) = sample_rgb_bilinear(src, p.x, p.y) {
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
    // Quad construction tests
    // ========================================================================

    #[test]
    fn test_skew_quad_positive_shrinks_top() {
        // skew=30 over width 100: offset = |round(100 * tan(30deg) / 2)| = 29
        let quad = skew_quad(100, 50, 30.0);
        assert_eq!(quad[0], Point::new(29.0, 0.0));
        assert_eq!(quad[1], Point::new(71.0, 0.0));
        assert_eq!(quad[2], Point::new(100.0, 50.0));
        assert_eq!(quad[3], Point::new(0.0, 50.0));
    }

    #[test]
    fn test_skew_quad_negative_shrinks_bottom() {
        let quad = skew_quad(100, 50, -30.0);
        assert_eq!(quad[0], Point::new(0.0, 0.0));
        assert_eq!(quad[1], Point::new(100.0, 0.0));
        assert_eq!(quad[2], Point::new(71.0, 50.0));
        assert_eq!(quad[3], Point::new(29.0, 50.0));
    }

    #[test]
    fn test_skew_quad_zero_is_rectangle() {
        assert_eq!(skew_quad(100, 50, 0.0), rect_quad(100, 50));
    }

    // ========================================================================
    // Correspondence solve tests
    // ========================================================================

    #[test]
    fn test_from_quads_identity() {
        let quad = rect_quad(10, 10);
        let coeffs = ProjectiveCoeffs::from_quads(quad, quad).unwrap();
        let p = coeffs.transform_point(Point::new(3.0, 7.0)).unwrap();
        assert!((p.x - 3.0).abs() < 1e-3);
        assert!((p.y - 7.0).abs() < 1e-3);
    }

    #[test]
    fn test_from_quads_maps_corners() {
        let src = rect_quad(100, 50);
        let dst = skew_quad(100, 50, 20.0);
        let coeffs = ProjectiveCoeffs::from_quads(src, dst).unwrap();
        for (s, d) in src.iter().zip(dst.iter()) {
            let p = coeffs.transform_point(*s).unwrap();
            assert!((p.x - d.x).abs() < 1e-2, "corner x: {} vs {}", p.x, d.x);
            assert!((p.y - d.y).abs() < 1e-2, "corner y: {} vs {}", p.y, d.y);
        }
    }

    #[test]
    fn test_from_quads_degenerate() {
        let src = rect_quad(10, 10);
        let dst = [Point::new(0.0, 0.0); 4];
        assert!(matches!(
            ProjectiveCoeffs::from_quads(src, dst),
            Err(TransformError::SingularMatrix)
        ));
    }

    // ========================================================================
    // Warp tests
    // ========================================================================

    #[test]
    fn test_warp_identical_quads_is_clone() {
        let mut src = Raster::new(20, 10, PixelFormat::Rgb8).unwrap();
        src.set_rgb_at(7, 3, 1, 2, 3);
        let quad = rect_quad(20, 10);
        let out = warp_projective(&src, quad, quad).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_warp_positive_skew_blackens_top_corners() {
        let mut src = Raster::new(100, 50, PixelFormat::Rgb8).unwrap();
        src.data_mut().fill(255);
        let out = warp_projective(
            &src,
            rect_quad(100, 50),
            skew_quad(100, 50, 30.0),
        )
        .unwrap();
        // Top corners are outside the trapezoid: fill stays black.
        assert_eq!(out.rgb_at(0, 0), (0, 0, 0));
        assert_eq!(out.rgb_at(99, 0), (0, 0, 0));
        // Top center and the lower interior lie inside the trapezoid.
        assert_eq!(out.rgb_at(50, 2), (255, 255, 255));
        assert_eq!(out.rgb_at(50, 47), (255, 255, 255));
    }

    #[test]
    fn test_warp_negative_skew_blackens_bottom_corners() {
        let mut src = Raster::new(100, 50, PixelFormat::Rgb8).unwrap();
        src.data_mut().fill(255);
        let out = warp_projective(
            &src,
            rect_quad(100, 50),
            skew_quad(100, 50, -30.0),
        )
        .unwrap();
        assert_eq!(out.rgb_at(0, 49), (0, 0, 0));
        assert_eq!(out.rgb_at(99, 49), (0, 0, 0));
        assert_eq!(out.rgb_at(50, 2), (255, 255, 255));
        assert_eq!(out.rgb_at(50, 25), (255, 255, 255));
    }

    #[test]
    fn test_warp_preserves_dimensions() {
        let src = Raster::new(64, 48, PixelFormat::Rgb8).unwrap();
        let out = warp_projective(&src, rect_quad(64, 48), skew_quad(64, 48, 30.0)).unwrap();
        assert_eq!(out.width(), 64);
        assert_eq!(out.height(), 48);
    }

    #[test]
    fn test_warp_collapsed_quad_renders_black() {
        // At 45 degrees the trapezoid offset reaches w/2 and the top edge
        // collapses to a point; the correspondence is singular, and the
        // warp must degrade to a black frame instead of erroring.
        let quad = skew_quad(64, 48, 45.0);
        assert_eq!(quad[0], quad[1]);
        assert!(matches!(
            ProjectiveCoeffs::from_quads(rect_quad(64, 48), quad),
            Err(TransformError::SingularMatrix)
        ));

        let mut src = Raster::new(64, 48, PixelFormat::Rgb8).unwrap();
        src.data_mut().fill(180);
        let out = warp_projective(&src, rect_quad(64, 48), quad).unwrap();
        assert_eq!((out.width(), out.height()), (64, 48));
        assert!(out.data().iter().all(|&v| v == 0));
    }
}
