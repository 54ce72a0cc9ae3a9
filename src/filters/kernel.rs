//! Integer convolution kernels.
//!
//! Every linear filter in the crate (box blur, sharpen, emboss, Sobel,
//! Laplace) is a [`ConvolutionKernel`] applied with [`ConvolutionKernel::apply`].
//!
//! ## Edge policy
//!
//! Taps that fall outside the source are skipped: they add nothing to the
//! channel sums and nothing to the weight sum. Near the borders the kernel
//! effectively shrinks instead of sampling padded values.
//!
//! ## Centering
//!
//! Tap `(i, j)` samples `(x - width/2 + i, y - height/2 + j)` with truncating
//! division. Even-sized kernels are therefore shifted one tap towards the
//! top-left.

use tracing::debug;

use crate::buffer::{Pixel, PixelBuffer};
use crate::error::{ensure_size, FilterError, FilterResult};

/// Immutable width x height grid of integer weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvolutionKernel {
    weights: Vec<i32>,
    width: u32,
    height: u32,
    offset: i32,
    absolute: bool,
}

impl ConvolutionKernel {
    /// Creates a kernel from row-major weights.
    pub fn new(width: u32, height: u32, weights: Vec<i32>) -> FilterResult<Self> {
        ensure_size("kernel width", width)?;
        ensure_size("kernel height", height)?;
        if weights.len() != width as usize * height as usize {
            return Err(FilterError::invalid(format!(
                "kernel has {} weights, expected {}x{}",
                weights.len(),
                width,
                height
            )));
        }
        Ok(ConvolutionKernel {
            weights,
            width,
            height,
            offset: 0,
            absolute: false,
        })
    }

    /// Fixed-size kernel from literal rows.
    pub(crate) fn from_rows<const W: usize, const H: usize>(rows: [[i32; W]; H]) -> Self {
        ConvolutionKernel {
            weights: rows.iter().flatten().copied().collect(),
            width: W as u32,
            height: H as u32,
            offset: 0,
            absolute: false,
        }
    }

    /// `size x size` kernel of ones (box average).
    pub fn uniform(size: u32) -> FilterResult<Self> {
        ensure_size("kernel size", size)?;
        Self::new(size, size, vec![1; size as usize * size as usize])
    }

    /// `size x size` kernel that copies the tap at the kernel center.
    pub fn identity(size: u32) -> FilterResult<Self> {
        ensure_size("kernel size", size)?;
        let mut weights = vec![0; size as usize * size as usize];
        let center = (size / 2) as usize;
        weights[center * size as usize + center] = 1;
        Self::new(size, size, weights)
    }

    /// Value added to every channel after normalization.
    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Take the absolute value of each channel sum before normalizing.
    pub fn with_absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn absolute(&self) -> bool {
        self.absolute
    }

    /// Weight at kernel column `i`, row `j`.
    pub fn weight(&self, i: u32, j: u32) -> Option<i32> {
        if i >= self.width || j >= self.height {
            return None;
        }
        Some(self.weights[(j * self.width + i) as usize])
    }

    /// Convolves `source` into a new buffer. Alpha is copied from the source.
    pub fn apply(&self, source: &PixelBuffer) -> FilterResult<PixelBuffer> {
        debug!(
            width = source.width(),
            height = source.height(),
            kernel_w = self.width,
            kernel_h = self.height,
            offset = self.offset,
            absolute = self.absolute,
            "convolve"
        );

        let (width, height) = (source.width() as i64, source.height() as i64);
        let kw = self.width as i64;
        let kh = self.height as i64;
        let cx = -(kw / 2);
        let cy = -(kh / 2);

        source.map_pixels(|x, y| {
            let mut sums = [0i64; 3];
            let mut weight_sum = 0i64;

            for j in 0..kh {
                let sy = y as i64 + cy + j;
                if sy < 0 || sy >= height {
                    continue;
                }
                for i in 0..kw {
                    let sx = x as i64 + cx + i;
                    if sx < 0 || sx >= width {
                        continue;
                    }
                    let w = self.weights[(j * kw + i) as usize] as i64;
                    let p = source.pixel(sx as usize, sy as usize);
                    sums[0] += w * p.r as i64;
                    sums[1] += w * p.g as i64;
                    sums[2] += w * p.b as i64;
                    weight_sum += w;
                }
            }

            if weight_sum == 0 {
                weight_sum = 1;
            }

            let rgb = sums.map(|sum| {
                let sum = if self.absolute { sum.abs() } else { sum };
                let v = (sum as f64 / weight_sum as f64).round() as i64 + self.offset as i64;
                v.clamp(0, 255) as u8
            });
            Pixel::from_channels(rgb, source.pixel(x, y).a)
        })
    }
}
