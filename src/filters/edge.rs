//! Edge and gradient filters: Sharpen, Emboss, Sobel, Laplace, threshold edges.
//!
//! The kernel-based filters here are fixed [`ConvolutionKernel`]s. The two
//! edge detectors run grayscale -> kernel -> invert, so edges come out dark
//! on a light background.
//!
//! Zero-sum kernels (Sobel, Laplace) see a shrunken kernel at the border,
//! where a flat region no longer cancels out. Only pixels whose full kernel
//! footprint is inside the image give a true zero response on flat input.

use tracing::debug;

use super::grayscale::{grayscale, invert};
use super::kernel::ConvolutionKernel;
use crate::buffer::{Pixel, PixelBuffer};
use crate::error::{FilterError, FilterResult};

// ============================================================================
// Fixed kernels
// ============================================================================

/// Sharpen kernel `[-1,-2,-1; -2,16,-2; -1,-2,-1]` (weights sum to 4).
pub fn sharpen_kernel() -> ConvolutionKernel {
    ConvolutionKernel::from_rows([[-1, -2, -1], [-2, 16, -2], [-1, -2, -1]])
}

/// Diagonal emboss kernel `[-2,-1,0; -1,1,1; 0,1,2]` (weights sum to 1).
pub fn emboss_kernel() -> ConvolutionKernel {
    ConvolutionKernel::from_rows([[-2, -1, 0], [-1, 1, 1], [0, 1, 2]])
}

/// Vertical Sobel gradient re-centered on mid-gray.
pub fn sobel_emboss_kernel() -> ConvolutionKernel {
    ConvolutionKernel::from_rows([[-1, -2, -1], [0, 0, 0], [1, 2, 1]]).with_offset(127)
}

/// Horizontal Sobel gradient magnitude.
pub fn sobel_horizontal_kernel() -> ConvolutionKernel {
    ConvolutionKernel::from_rows([[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]).with_absolute(true)
}

/// Vertical Sobel gradient magnitude.
pub fn sobel_vertical_kernel() -> ConvolutionKernel {
    ConvolutionKernel::from_rows([[-1, -2, -1], [0, 0, 0], [1, 2, 1]]).with_absolute(true)
}

/// 5x5 Laplace kernel: center 24, every other weight -1.
pub fn laplace_kernel() -> ConvolutionKernel {
    let mut rows = [[-1; 5]; 5];
    rows[2][2] = 24;
    ConvolutionKernel::from_rows(rows)
}

// ============================================================================
// Sharpen / Emboss
// ============================================================================

/// Apply sharpen.
///
/// Convolves with [`sharpen_kernel`]; flat regions are unchanged.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
///
/// # Returns
/// Sharpened buffer, alpha preserved
pub fn sharpen(source: &PixelBuffer) -> FilterResult<PixelBuffer> {
    debug!(width = source.width(), height = source.height(), "sharpen");
    sharpen_kernel().apply(source)
}

/// Apply emboss.
///
/// Convolves with [`emboss_kernel`], lighting from the bottom-right.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
///
/// # Returns
/// Embossed buffer, alpha preserved
pub fn emboss(source: &PixelBuffer) -> FilterResult<PixelBuffer> {
    debug!(width = source.width(), height = source.height(), "emboss");
    emboss_kernel().apply(source)
}

/// Apply Sobel emboss.
///
/// Convolves with [`sobel_emboss_kernel`], `[-1,-2,-1; 0,0,0; 1,2,1]` plus
/// 127, so flat regions become mid-gray.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
///
/// # Returns
/// Embossed buffer, alpha preserved
pub fn sobel_emboss(source: &PixelBuffer) -> FilterResult<PixelBuffer> {
    debug!(width = source.width(), height = source.height(), "sobel_emboss");
    sobel_emboss_kernel().apply(source)
}

// ============================================================================
// Sobel / Laplace Edge Detection
// ============================================================================

/// Sobel edge detection.
///
/// Grayscale, then horizontal and vertical gradient magnitudes summed per
/// channel (clamped to 255), then inverted.
///
/// # Returns
/// Dark edges on white, alpha preserved
pub fn sobel_edge_detection(source: &PixelBuffer) -> FilterResult<PixelBuffer> {
    debug!(width = source.width(), height = source.height(), "sobel_edge_detection");

    let gray = grayscale(source)?;
    let gx = sobel_horizontal_kernel().apply(&gray)?;
    let gy = sobel_vertical_kernel().apply(&gray)?;

    let combined = gray.map_pixels(|x, y| {
        let a = gx.pixel(x, y);
        let b = gy.pixel(x, y);
        Pixel::rgba(
            a.r.saturating_add(b.r),
            a.g.saturating_add(b.g),
            a.b.saturating_add(b.b),
            a.a,
        )
    })?;
    invert(&combined)
}

/// Laplace edge detection: grayscale, 5x5 Laplace kernel, inverted.
pub fn laplace_edge_detection(source: &PixelBuffer) -> FilterResult<PixelBuffer> {
    debug!(width = source.width(), height = source.height(), "laplace_edge_detection");

    let gray = grayscale(source)?;
    let edges = laplace_kernel().apply(&gray)?;
    invert(&edges)
}

// ============================================================================
// Threshold Edge Detection
// ============================================================================

/// Paint pixels that differ strongly from their neighbor.
///
/// Each pixel is compared with its diagonal neighbor `(x+1, y+1)`, falling
/// back to `(x+1, y)` and then `(x, y+1)` at the borders. When the RGB
/// distance exceeds `threshold` the pixel becomes `edge_color`; otherwise it
/// is copied.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
/// * `threshold` - Euclidean RGB distance (0 to ~441.7), must be finite and non-negative
/// * `edge_color` - Color written on edges
pub fn edge_detection(
    source: &PixelBuffer,
    threshold: f64,
    edge_color: Pixel,
) -> FilterResult<PixelBuffer> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(FilterError::invalid(format!(
            "edge threshold must be a non-negative number, got {threshold}"
        )));
    }
    debug!(width = source.width(), height = source.height(), threshold, "edge_detection");

    source.map_pixels(|x, y| {
        let p = source.pixel(x, y);
        let (xi, yi) = (x as i64, y as i64);
        let neighbor = [(xi + 1, yi + 1), (xi + 1, yi), (xi, yi + 1)]
            .into_iter()
            .find(|&(nx, ny)| source.in_bounds(nx, ny));

        match neighbor {
            Some((nx, ny)) if p.distance(&source.pixel(nx as usize, ny as usize)) > threshold => {
                edge_color
            }
            _ => p,
        }
    })
}
