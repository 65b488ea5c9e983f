//! Viewport fitting
//!
//! Scales a rendered frame to fit the display window while preserving
//! aspect ratio. Resampling is area-averaging: every destination pixel is
//! the coverage-weighted mean of the source box it spans, which
//! anti-aliases downscales (and degrades gracefully to box sampling for
//! upscales).

use crate::error::{TransformError, TransformResult};
use artstar_core::{PixelFormat, Raster};

/// Fit a raster into a `target_width` x `target_height` viewport.
///
/// The scale factor is `min(target_w / w, target_h / h)`, applied to both
/// axes so aspect ratio is preserved. Scaled dimensions are truncated to
/// integers. Non-positive targets mean the window is not realized yet;
/// the input is returned unchanged (never an error). A scale of exactly
/// 1 is also a no-op.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedFormat`] for non-RGB input.
pub fn fit_to_viewport(
    src: &Raster,
    target_width: i32,
    target_height: i32,
) -> TransformResult<Raster> {
    if src.format() != PixelFormat::Rgb8 {
        return Err(TransformError::UnsupportedFormat(src.format()));
    }
    if target_width <= 0 || target_height <= 0 {
        return Ok(src.clone());
    }

    let w = src.width() as f32;
    let h = src.height() as f32;
    let scale = (target_width as f32 / w).min(target_height as f32 / h);

    let dst_w = ((w * scale) as u32).max(1);
    let dst_h = ((h * scale) as u32).max(1);
    if dst_w == src.width() && dst_h == src.height() {
        return Ok(src.clone());
    }

    area_map_resize(src, dst_w, dst_h)
}

/// Area-map resample to an exact destination size.
///
/// Each destination pixel averages the (fractional) source box
/// `[dx*sx, (dx+1)*sx) x [dy*sy, (dy+1)*sy)` with per-row/column coverage
/// weights.
fn area_map_resize(src: &Raster, dst_w: u32, dst_h: u32) -> TransformResult<Raster> {
    let mut dst = Raster::new(dst_w, dst_h, PixelFormat::Rgb8)?;
    let sx = src.width() as f32 / dst_w as f32;
    let sy = src.height() as f32 / dst_h as f32;
    let src_w = src.width();
    let src_h = src.height();

    for dy in 0..dst_h {
        let y0 = dy as f32 * sy;
        let y1 = (dy + 1) as f32 * sy;
        for dx in 0..dst_w {
            let x0 = dx as f32 * sx;
            let x1 = (dx + 1) as f32 * sx;

            let mut acc = [0.0f32; 3];
            let mut area = 0.0f32;

            let mut iy = y0.floor() as u32;
            while (iy as f32) < y1 && iy < src_h {
                let wy = row_coverage(iy, y0, y1);
                let mut ix = x0.floor() as u32;
                while (ix as f32) < x1 && ix < src_w {
                    let wx = row_coverage(ix, x0, x1);
                    let weight = wx * wy;
                    let (r, g, b) = src.rgb_at(ix, iy);
                    acc[0] += r as f32 * weight;
                    acc[1] += g as f32 * weight;
                    acc[2] += b as f32 * weight;
                    area += weight;
                    ix += 1;
                }
                iy += 1;
            }

            if area > 0.0 {
                dst.set_rgb_at(
                    dx,
                    dy,
                    (acc[0] / area).round().clamp(0.0, 255.0) as u8,
                    (acc[1] / area).round().clamp(0.0, 255.0) as u8,
                    (acc[2] / area).round().clamp(0.0, 255.0) as u8,
                );
            }
        }
    }
    Ok(dst)
}

/// Overlap of source cell `[i, i+1)` with the interval `[lo, hi)`.
#[inline]
fn row_coverage(i: u32, lo: f32, hi: f32) -> f32 {
    let cell_lo = i as f32;
    let cell_hi = cell_lo + 1.0;
    (hi.min(cell_hi) - lo.max(cell_lo)).max(0.0)
}
