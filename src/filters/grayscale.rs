//! Grayscale and invert passes.
//!
//! These are the pre- and post-passes of the edge detectors
//! ([`edge`](super::edge)). Grayscale uses ITU-R BT.709 luminosity
//! coefficients; both passes preserve alpha.

use crate::buffer::{Pixel, PixelBuffer};
use crate::error::FilterResult;

/// ITU-R BT.709 luminosity coefficients
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Luminosity of a pixel, truncated to `u8`.
#[inline]
pub fn luminosity(p: Pixel) -> u8 {
    (LUMA_R * p.r as f32 + LUMA_G * p.g as f32 + LUMA_B * p.b as f32) as u8
}

/// Convert to grayscale (luminosity method).
///
/// Output has R=G=B=luminosity, alpha preserved.
pub fn grayscale(source: &PixelBuffer) -> FilterResult<PixelBuffer> {
    source.map_pixels(|x, y| {
        let p = source.pixel(x, y);
        let gray = luminosity(p);
        Pixel::rgba(gray, gray, gray, p.a)
    })
}

/// Negate color channels (255 - value), alpha preserved.
pub fn invert(source: &PixelBuffer) -> FilterResult<PixelBuffer> {
    source.map_pixels(|x, y| {
        let p = source.pixel(x, y);
        Pixel::rgba(255 - p.r, 255 - p.g, 255 - p.b, p.a)
    })
}
