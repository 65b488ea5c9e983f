//! Shared inverse-mapping sample helpers
//!
//! Both warps in this crate are destination-driven: every output pixel is
//! mapped back into the source and sampled bilinearly. Samples that fall
//! outside the source keep the destination's zero fill (black).

use artstar_core::Raster;

/// Bilinear interpolation of one channel.
#[inline]
fn interp_channel(p00: u8, p10: u8, p01: u8, p11: u8, fx: f32, fy: f32) -> u8 {
    let top = p00 as f32 * (1.0 - fx) + p10 as f32 * fx;
    let bottom = p01 as f32 * (1.0 - fx) + p11 as f32 * fx;
    (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
}

/// Bilinear RGB sample at fractional source coordinates.
///
/// Returns `None` when (sx, sy) lies outside the source raster; edge
/// pixels are sampled with the neighborhood clamped to the image.
pub(crate) fn sample_rgb_bilinear(src: &Raster, sx: f32, sy: f32) -> Option<(u8, u8, u8)> {
    let w = src.width() as i32;
    let h = src.height() as i32;

    if sx < 0.0 || sy < 0.0 || sx > (w - 1) as f32 || sy > (h - 1) as f32 {
        return None;
    }

    let x0 = sx.floor() as i32;
    let y0 = sy.floor() as i32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = sx - x0 as f32;
    let fy = sy - y0 as f32;

    let (r00, g00, b00) = src.rgb_at(x0 as u32, y0 as u32);
    let (r10, g10, b10) = src.rgb_at(x1 as u32, y0 as u32);
    let (r01, g01, b01) = src.rgb_at(x0 as u32, y1 as u32);
    let (r11, g11, b11) = src.rgb_at(x1 as u32, y1 as u32);

    Some((
        interp_channel(r00, r10, r01, r11, fx, fy),
        interp_channel(g00, g10, g01, g11, fx, fy),
        interp_channel(b00, b10, b01, b11, fx, fy),
    ))
}
