//! Pixel storage shared by every filter.
//!
//! A [`PixelBuffer`] owns a `(height, width, channels)` array of `u8`
//! samples, with 3 (RGB) or 4 (RGBA) channels. Filters take their source as
//! `&PixelBuffer` and build their result through [`PixelBuffer::map_pixels`],
//! which writes into a freshly allocated row store. A filter therefore never
//! samples the buffer it is writing.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};

/// A single RGBA sample. RGB buffers read back with `a = 255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    /// Opaque pixel.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel { r, g, b, a }
    }

    /// Color channel by index (0 = R, 1 = G, 2 = B).
    #[inline]
    pub fn channel(&self, c: usize) -> u8 {
        match c {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }

    /// Euclidean distance between the RGB parts of two pixels.
    #[inline]
    pub fn distance(&self, other: &Pixel) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Builds a pixel from RGB channel values, keeping `alpha`.
    #[inline]
    pub(crate) fn from_channels(rgb: [u8; 3], alpha: u8) -> Self {
        Pixel::rgba(rgb[0], rgb[1], rgb[2], alpha)
    }
}

/// An RGB or RGBA raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

fn check_dims(width: usize, height: usize, channels: usize) -> FilterResult<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::invalid(format!(
            "buffer dimensions must be non-zero, got {width}x{height}"
        )));
    }
    if channels != 3 && channels != 4 {
        return Err(FilterError::invalid(format!(
            "expected 3 or 4 channels, got {channels}"
        )));
    }
    if width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(FilterError::invalid("buffer dimensions exceed u32"));
    }
    Ok(())
}

impl PixelBuffer {
    /// Zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: usize) -> FilterResult<Self> {
        check_dims(width as usize, height as usize, channels)?;
        Ok(PixelBuffer {
            data: Array3::zeros((height as usize, width as usize, channels)),
        })
    }

    /// Buffer where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, channels: usize, pixel: Pixel) -> FilterResult<Self> {
        let mut buffer = Self::new(width, height, channels)?;
        for mut px in buffer.data.lanes_mut(ndarray::Axis(2)) {
            px[0] = pixel.r;
            px[1] = pixel.g;
            px[2] = pixel.b;
            if channels == 4 {
                px[3] = pixel.a;
            }
        }
        Ok(buffer)
    }

    /// Wraps interleaved samples, row-major, `channels` bytes per pixel.
    pub fn from_raw(width: u32, height: u32, channels: usize, data: Vec<u8>) -> FilterResult<Self> {
        check_dims(width as usize, height as usize, channels)?;
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(FilterError::invalid(format!(
                "expected {expected} bytes for {width}x{height}x{channels}, got {}",
                data.len()
            )));
        }
        let data = Array3::from_shape_vec((height as usize, width as usize, channels), data)?;
        Ok(PixelBuffer { data })
    }

    /// Takes ownership of a `(height, width, channels)` array.
    pub fn from_array(data: Array3<u8>) -> FilterResult<Self> {
        let (height, width, channels) = data.dim();
        check_dims(width, height, channels)?;
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(PixelBuffer { data })
    }

    /// Copies a `(height, width, channels)` view.
    pub fn from_view(view: ArrayView3<u8>) -> FilterResult<Self> {
        let (height, width, channels) = view.dim();
        check_dims(width, height, channels)?;
        Ok(PixelBuffer {
            data: view.as_standard_layout().into_owned(),
        })
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Interleaved samples in row-major order.
    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels() == 4
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// Reads a pixel, failing for coordinates outside the buffer.
    pub fn get(&self, x: i64, y: i64) -> FilterResult<Pixel> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_range(x, y));
        }
        Ok(self.pixel(x as usize, y as usize))
    }

    /// Writes a pixel, failing for coordinates outside the buffer.
    ///
    /// Alpha is ignored on RGB buffers.
    pub fn set(&mut self, x: i64, y: i64, pixel: Pixel) -> FilterResult<()> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_range(x, y));
        }
        let (x, y) = (x as usize, y as usize);
        self.data[[y, x, 0]] = pixel.r;
        self.data[[y, x, 1]] = pixel.g;
        self.data[[y, x, 2]] = pixel.b;
        if self.has_alpha() {
            self.data[[y, x, 3]] = pixel.a;
        }
        Ok(())
    }

    /// Reads the pixel nearest to `(x, y)` inside the buffer.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> Pixel {
        let x = x.clamp(0, self.width() as i64 - 1) as usize;
        let y = y.clamp(0, self.height() as i64 - 1) as usize;
        self.pixel(x, y)
    }

    /// Unchecked-by-contract read; callers have already bounds-checked.
    #[inline]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Pixel {
        let a = if self.has_alpha() {
            self.data[[y, x, 3]]
        } else {
            255
        };
        Pixel::rgba(
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            a,
        )
    }

    fn out_of_range(&self, x: i64, y: i64) -> FilterError {
        FilterError::IndexOutOfRange {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }

    /// Builds a new buffer of the same shape, computing every pixel with `f(x, y)`.
    ///
    /// Rows are filled in parallel into a separate allocation.
    pub(crate) fn map_pixels<F>(&self, f: F) -> FilterResult<PixelBuffer>
    where
        F: Fn(usize, usize) -> Pixel + Sync,
    {
        let (height, width, channels) = self.data.dim();
        let stride = width * channels;
        let mut out = vec![0u8; height * stride];

        out.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.chunks_exact_mut(channels).enumerate() {
                    let p = f(x, y);
                    px[0] = p.r;
                    px[1] = p.g;
                    px[2] = p.b;
                    if channels == 4 {
                        px[3] = p.a;
                    }
                }
            });

        let data = Array3::from_shape_vec((height, width, channels), out)?;
        Ok(PixelBuffer { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        let err = PixelBuffer::from_raw(2, 2, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(PixelBuffer::new(0, 4, 3).is_err());
        assert!(PixelBuffer::new(4, 0, 3).is_err());
        assert!(PixelBuffer::new(4, 4, 2).is_err());
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut buf = PixelBuffer::new(3, 2, 4).unwrap();
        buf.set(2, 1, Pixel::rgba(10, 20, 30, 40)).unwrap();
        assert_eq!(buf.get(2, 1).unwrap(), Pixel::rgba(10, 20, 30, 40));
        assert_eq!(buf.view()[[1, 2, 1]], 20);
    }

    #[test]
    fn test_rgb_reads_opaque() {
        let mut buf = PixelBuffer::new(1, 1, 3).unwrap();
        buf.set(0, 0, Pixel::rgba(1, 2, 3, 0)).unwrap();
        assert_eq!(buf.get(0, 0).unwrap(), Pixel::rgb(1, 2, 3));
    }

    #[test]
    fn test_out_of_bounds_access_fails() {
        let mut buf = PixelBuffer::new(2, 2, 3).unwrap();
        assert!(matches!(
            buf.get(-1, 0),
            Err(FilterError::IndexOutOfRange { x: -1, y: 0, .. })
        ));
        assert!(buf.get(0, 2).is_err());
        assert!(buf.set(2, 0, Pixel::WHITE).is_err());
    }

    #[test]
    fn test_get_clamped() {
        let mut buf = PixelBuffer::new(2, 2, 3).unwrap();
        buf.set(1, 1, Pixel::WHITE).unwrap();
        assert_eq!(buf.get_clamped(5, 9), Pixel::WHITE);
        assert_eq!(buf.get_clamped(-3, -3), Pixel::BLACK);
    }

    #[test]
    fn test_from_array_non_standard_layout() {
        let mut arr = Array3::<u8>::zeros((2, 3, 3));
        arr[[0, 2, 0]] = 7;
        // Permuted view forces a non-standard layout copy.
        let permuted = arr.view().permuted_axes([1, 0, 2]).to_owned();
        let buf = PixelBuffer::from_array(permuted).unwrap();
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.get(0, 2).unwrap().r, 7);
        assert_eq!(buf.into_raw()[2 * 2 * 3], 7);
    }

    #[test]
    fn test_map_pixels_allocates_new_buffer() {
        let src = PixelBuffer::filled(4, 3, 4, Pixel::rgba(5, 6, 7, 8)).unwrap();
        let out = src
            .map_pixels(|x, y| Pixel::rgba(x as u8, y as u8, 0, 9))
            .unwrap();
        assert_eq!(out.get(3, 2).unwrap(), Pixel::rgba(3, 2, 0, 9));
        assert_eq!(src.get(3, 2).unwrap(), Pixel::rgba(5, 6, 7, 8));
    }
}
