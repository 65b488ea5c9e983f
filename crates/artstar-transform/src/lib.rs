//! artstar-transform - Geometric transformations for Art Star
//!
//! This crate provides the geometric stages of the compositing pipeline:
//!
//! - Affine warps (rotation + translation matrices, uniform zoom scaling)
//! - Projective warps (4-point correspondence, trapezoidal skew)
//! - Viewport fitting (aspect-preserving area-map resize)
//!
//! All warps map destination pixels back through the inverse transform and
//! sample the source bilinearly; pixels that land outside the source stay
//! black.

pub mod affine;
mod error;
pub mod projective;
mod sampling;
pub mod viewport;

pub use affine::{AffineMatrix, Point, warp_affine};
pub use error::{TransformError, TransformResult};
pub use projective::{ProjectiveCoeffs, rect_quad, skew_quad, warp_projective};
pub use viewport::fit_to_viewport;
