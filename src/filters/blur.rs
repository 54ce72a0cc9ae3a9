//! Blur filters: Box blur and three-pass Gaussian approximation.
//!
//! Both are built on [`ConvolutionKernel`], so they share its edge policy:
//! taps outside the image are dropped and the average is taken over the
//! remaining ones. A uniform image stays uniform right up to the border.

use tracing::{debug, trace};

use super::kernel::ConvolutionKernel;
use crate::buffer::PixelBuffer;
use crate::error::{ensure_size, FilterResult};

/// Apply box blur.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
/// * `size` - Side of the square all-ones kernel
///
/// # Returns
/// Blurred buffer with the same dimensions, alpha preserved
pub fn box_blur(source: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    ensure_size("blur size", size)?;
    debug!(width = source.width(), height = source.height(), size, "box_blur");
    ConvolutionKernel::uniform(size)?.apply(source)
}

/// Apply Gaussian blur as three cascaded box blurs.
///
/// This is the box-filter approximation of a Gaussian, not a Gaussian
/// coefficient kernel; output matches exactly three [`box_blur`] passes.
pub fn gaussian_blur(source: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    ensure_size("blur size", size)?;
    debug!(width = source.width(), height = source.height(), size, "gaussian_blur");

    let kernel = ConvolutionKernel::uniform(size)?;
    let mut result = kernel.apply(source)?;
    for pass in 2..=3 {
        trace!(pass, "gaussian_blur box pass");
        result = kernel.apply(&result)?;
    }
    Ok(result)
}
