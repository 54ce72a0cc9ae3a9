//! Morphology filters: Dilate, Erode.
//!
//! Per-channel maximum / minimum over the half-open aperture described in
//! [`aperture`](super::aperture). Out-of-bounds samples are skipped.

use tracing::debug;

use super::aperture::for_each_in_aperture;
use crate::buffer::{Pixel, PixelBuffer};
use crate::error::{ensure_size, FilterResult};

// ============================================================================
// Dilate
// ============================================================================

/// Apply dilation.
///
/// Dilate takes the maximum value in the neighborhood,
/// making bright regions grow and dark regions shrink.
///
/// The accumulator starts at 0, so an aperture with no in-bounds sample
/// would produce black. Every aperture contains its center pixel, so this
/// does not occur.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
/// * `size` - Aperture size (at least 1)
///
/// # Returns
/// Dilated buffer, alpha preserved
pub fn dilate(source: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    ensure_size("aperture size", size)?;
    debug!(width = source.width(), height = source.height(), size, "dilate");

    source.map_pixels(|x, y| {
        let mut max_val = [0u8; 3];
        for_each_in_aperture(source, x, y, size, |p| {
            for (c, m) in max_val.iter_mut().enumerate() {
                *m = (*m).max(p.channel(c));
            }
        });
        Pixel::from_channels(max_val, source.pixel(x, y).a)
    })
}

// ============================================================================
// Erode
// ============================================================================

/// Apply erosion.
///
/// Erode takes the minimum value in the neighborhood,
/// making dark regions grow and bright regions shrink.
pub fn erode(source: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    ensure_size("aperture size", size)?;
    debug!(width = source.width(), height = source.height(), size, "erode");

    source.map_pixels(|x, y| {
        let mut min_val = [255u8; 3];
        for_each_in_aperture(source, x, y, size, |p| {
            for (c, m) in min_val.iter_mut().enumerate() {
                *m = (*m).min(p.channel(c));
            }
        });
        Pixel::from_channels(min_val, source.pixel(x, y).a)
    })
}
