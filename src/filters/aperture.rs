//! Order-statistic aperture filters: Median, Kuwahara, Symmetric Nearest Neighbor.
//!
//! ## Aperture
//!
//! For an aperture `size`, offsets run over the half-open range
//! `[-(size/2), size/2)` on both axes, with truncating division. The range is
//! asymmetric: size 3 samples offsets `{-1, 0}`, size 4 samples
//! `{-2, -1, 0, 1}`. Size 1 degenerates to the center pixel alone. Samples
//! outside the image are skipped, never clamped.

use std::ops::Range;

use tracing::debug;

use super::mean_u8;
use crate::buffer::{Pixel, PixelBuffer};
use crate::error::{ensure_size, FilterResult};

/// Offsets sampled by an aperture of `size` along one axis.
pub fn aperture_range(size: u32) -> Range<i64> {
    let half = (size / 2) as i64;
    if half == 0 {
        0..1
    } else {
        -half..half
    }
}

/// Calls `f` for every in-bounds pixel of the aperture around `(x, y)`.
#[inline]
pub(crate) fn for_each_in_aperture<F>(source: &PixelBuffer, x: usize, y: usize, size: u32, mut f: F)
where
    F: FnMut(Pixel),
{
    let range = aperture_range(size);
    for dy in range.clone() {
        let sy = y as i64 + dy;
        if sy < 0 || sy >= source.height() as i64 {
            continue;
        }
        for dx in range.clone() {
            let sx = x as i64 + dx;
            if sx < 0 || sx >= source.width() as i64 {
                continue;
            }
            f(source.pixel(sx as usize, sy as usize));
        }
    }
}

// ============================================================================
// Median
// ============================================================================

/// Apply median filter.
///
/// Each channel is sorted independently; the output is the element at index
/// `count / 2`, the upper middle for even sample counts.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
/// * `size` - Aperture size (at least 1)
///
/// # Returns
/// Median-filtered buffer, alpha preserved
pub fn median(source: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    ensure_size("aperture size", size)?;
    debug!(width = source.width(), height = source.height(), size, "median");

    let window = aperture_range(size).count().pow(2);

    source.map_pixels(|x, y| {
        let mut channels: [Vec<u8>; 3] = [
            Vec::with_capacity(window),
            Vec::with_capacity(window),
            Vec::with_capacity(window),
        ];
        for_each_in_aperture(source, x, y, size, |p| {
            channels[0].push(p.r);
            channels[1].push(p.g);
            channels[2].push(p.b);
        });

        let rgb = channels.map(|mut values| {
            values.sort_unstable();
            values[values.len() / 2]
        });
        Pixel::from_channels(rgb, source.pixel(x, y).a)
    })
}

// ============================================================================
// Kuwahara
// ============================================================================

/// Apply Kuwahara blur.
///
/// The aperture is split into four quadrants that share the center row and
/// column. The output is the mean color of the quadrant whose summed
/// per-channel range (max - min) is smallest; ties go to the first quadrant
/// in top-left, top-right, bottom-left, bottom-right order.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
/// * `size` - Aperture size (at least 1)
///
/// # Returns
/// Smoothed buffer, alpha preserved
pub fn kuwahara(source: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    ensure_size("aperture size", size)?;
    debug!(width = source.width(), height = source.height(), size, "kuwahara");

    let half = (size / 2) as i64;
    // (x range, y range), inclusive, in selection priority order.
    let quadrants = [
        ((-half, 0), (-half, 0)),
        ((0, half), (-half, 0)),
        ((-half, 0), (0, half)),
        ((0, half), (0, half)),
    ];
    let (width, height) = (source.width() as i64, source.height() as i64);

    source.map_pixels(|x, y| {
        let mut best: Option<(u32, [u8; 3])> = None;

        for &((x0, x1), (y0, y1)) in &quadrants {
            let mut sums = [0u64; 3];
            let mut mins = [u8::MAX; 3];
            let mut maxs = [u8::MIN; 3];
            let mut count = 0u64;

            for dy in y0..=y1 {
                let sy = y as i64 + dy;
                if sy < 0 || sy >= height {
                    continue;
                }
                for dx in x0..=x1 {
                    let sx = x as i64 + dx;
                    if sx < 0 || sx >= width {
                        continue;
                    }
                    let p = source.pixel(sx as usize, sy as usize);
                    for c in 0..3 {
                        let v = p.channel(c);
                        sums[c] += v as u64;
                        mins[c] = mins[c].min(v);
                        maxs[c] = maxs[c].max(v);
                    }
                    count += 1;
                }
            }

            if count == 0 {
                continue;
            }

            let range: u32 = (0..3).map(|c| (maxs[c] - mins[c]) as u32).sum();
            if best.map_or(true, |(best_range, _)| range < best_range) {
                best = Some((range, sums.map(|s| mean_u8(s, count))));
            }
        }

        let center = source.pixel(x, y);
        match best {
            Some((_, rgb)) => Pixel::from_channels(rgb, center.a),
            None => center,
        }
    })
}

// ============================================================================
// Symmetric Nearest Neighbor
// ============================================================================

/// Apply symmetric-nearest-neighbor blur.
///
/// For every offset `(dx, dy)` in the aperture whose mirror `(-dx, -dy)` is
/// also in bounds, the one of the two neighbors closer in RGB to the center
/// pixel is kept (the first on ties). The output is the mean of the kept
/// neighbors.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
/// * `size` - Aperture size (at least 1)
///
/// # Returns
/// Smoothed buffer, alpha preserved
pub fn snn_blur(source: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    ensure_size("aperture size", size)?;
    debug!(width = source.width(), height = source.height(), size, "snn_blur");

    let range = aperture_range(size);

    source.map_pixels(|x, y| {
        let center = source.pixel(x, y);
        let (x, y) = (x as i64, y as i64);
        let mut sums = [0u64; 3];
        let mut pairs = 0u64;

        for dy in range.clone() {
            for dx in range.clone() {
                let (x1, y1) = (x + dx, y + dy);
                let (x2, y2) = (x - dx, y - dy);
                if !source.in_bounds(x1, y1) || !source.in_bounds(x2, y2) {
                    continue;
                }
                let p1 = source.pixel(x1 as usize, y1 as usize);
                let p2 = source.pixel(x2 as usize, y2 as usize);
                let kept = if center.distance(&p1) <= center.distance(&p2) {
                    p1
                } else {
                    p2
                };
                sums[0] += kept.r as u64;
                sums[1] += kept.g as u64;
                sums[2] += kept.b as u64;
                pairs += 1;
            }
        }

        if pairs == 0 {
            return center;
        }
        Pixel::from_channels(sums.map(|s| mean_u8(s, pairs)), center.a)
    })
}
