//! Filter modules for neighborhood image processing.
//!
//! ## Supported Formats
//!
//! Every filter takes a [`PixelBuffer`](crate::PixelBuffer) with 3 (RGB) or
//! 4 (RGBA) `u8` channels and returns a new buffer of the same shape.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - the source is borrowed immutably, the output is a fresh allocation
//! - **Alpha preservation** - color filters copy alpha from the center pixel
//! - **Skip, don't pad** - aperture and kernel samples outside the image are dropped
//! - **Thread-safe** - output rows are computed in parallel with rayon
//! - **Deterministic** - seeded filters repeat bit-for-bit for the same seed
//!
//! ## Filter Categories
//!
//! - **Convolution**: [`kernel::ConvolutionKernel`], box and Gaussian blur
//! - **Order statistics**: median, Kuwahara, SNN blur, dilate, erode
//! - **Edge detection**: Sobel, Laplace, threshold edges, sharpen, emboss
//! - **Tonal**: histogram equalization
//! - **Distortion**: turbulence, sine wave, jitter, pixelate

pub mod aperture;
pub mod blur;
pub mod distortion;
pub mod edge;
pub mod grayscale;
pub mod histogram;
pub mod kernel;
pub mod morphology;
pub mod noise;
pub mod pixelate;

/// Rounded mean of `count` samples summing to `sum`.
#[inline]
pub(crate) fn mean_u8(sum: u64, count: u64) -> u8 {
    (sum as f64 / count as f64).round().min(255.0) as u8
}
