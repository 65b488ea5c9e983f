//! Canny-style edge detection
//!
//! The detector runs the classic four stages on a grayscale copy of the
//! input: Sobel gradients, L1 magnitude, non-maximum suppression along
//! the quantized gradient direction, and two-threshold hysteresis. The
//! output is a binary map where edge pixels are 255 and everything else
//! is 0.

use crate::error::FilterResult;
use artstar_core::{PixelFormat, Raster, to_gray};

/// Sobel gradient pair at every interior pixel, L1 magnitude.
///
/// Border pixels get zero gradients, which keeps them out of the edge map.
fn sobel_gradients(gray: &Raster) -> (Vec<i32>, Vec<i32>, Vec<i32>) {
    let w = gray.width() as usize;
    let h = gray.height() as usize;
    let data = gray.data();
    let mut gx = vec![0i32; w * h];
    let mut gy = vec![0i32; w * h];
    let mut mag = vec![0i32; w * h];

    let at = |x: usize, y: usize| data[y * w + x] as i32;

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let sx = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
            let sy = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));
            let i = y * w + x;
            gx[i] = sx;
            gy[i] = sy;
            mag[i] = sx.abs() + sy.abs();
        }
    }
    (gx, gy, mag)
}

/// Suppress gradient magnitudes that are not a local maximum along the
/// gradient direction, quantized to 0, 45, 90 or 135 degrees.
fn non_maximum_suppression(gx: &[i32], gy: &[i32], mag: &[i32], w: usize, h: usize) -> Vec<i32> {
    let mut out = vec![0i32; w * h];
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            let m = mag[i];
            if m == 0 {
                continue;
            }
            // Quantize the gradient direction to one of four sectors.
            let angle = (gy[i] as f32).atan2(gx[i] as f32).to_degrees();
            let angle = if angle < 0.0 { angle + 180.0 } else { angle };
            let (na, nb) = if !(22.5..157.5).contains(&angle) {
                // Horizontal gradient, vertical edge
                (mag[i - 1], mag[i + 1])
            } else if angle < 67.5 {
                (mag[i - w + 1], mag[i + w - 1])
            } else if angle < 112.5 {
                // Vertical gradient, horizontal edge
                (mag[i - w], mag[i + w])
            } else {
                (mag[i - w - 1], mag[i + w + 1])
            };
            if m >= na && m >= nb {
                out[i] = m;
            }
        }
    }
    out
}

/// Compute a binary edge map of `src`.
///
/// Magnitudes at or above `high` seed edges; magnitudes in `[low, high)`
/// are kept only when 8-connected to a seed. Thresholds are swapped if
/// given out of order, and negative values are treated as zero.
pub fn edge_map(src: &Raster, low: i32, high: i32) -> FilterResult<Raster> {
    let gray = match src.format() {
        PixelFormat::Gray8 => src.clone(),
        PixelFormat::Rgb8 => to_gray(src)?,
    };
    let w = gray.width() as usize;
    let h = gray.height() as usize;

    let (mut low, mut high) = (low.max(0), high.max(0));
    if low > high {
        std::mem::swap(&mut low, &mut high);
    }

    let (gx, gy, mag) = sobel_gradients(&gray);
    let thin = non_maximum_suppression(&gx, &gy, &mag, w, h);

    // Hysteresis: flood from strong pixels through weak ones.
    const NONE: u8 = 0;
    const WEAK: u8 = 1;
    const STRONG: u8 = 2;
    let mut grade = vec![NONE; w * h];
    let mut stack = Vec::new();
    for i in 0..w * h {
        if thin[i] >= high {
            grade[i] = STRONG;
            stack.push(i);
        } else if thin[i] >= low {
            grade[i] = WEAK;
        }
    }
    while let Some(i) = stack.pop() {
        let x = i % w;
        let y = i / w;
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                    continue;
                }
                let ni = ny as usize * w + nx as usize;
                if grade[ni] == WEAK {
                    grade[ni] = STRONG;
                    stack.push(ni);
                }
            }
        }
    }

    let mut dst = Raster::new(src.width(), src.height(), PixelFormat::Gray8)?;
    let out = dst.data_mut();
    for i in 0..w * h {
        out[i] = if grade[i] == STRONG { 255 } else { 0 };
    }
    Ok(dst)
}
