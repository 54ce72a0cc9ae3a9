//! Aperture Rust
//!
//! Pixel-neighborhood convolution and aperture filters, with Python bindings
//! via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Filters work on a [`PixelBuffer`]: a `(height, width, channels)` grid of
//! `u8` samples with 3 (RGB) or 4 (RGBA) channels.
//!
//! ## Filter Architecture
//! Every filter borrows its source immutably and returns a newly allocated
//! buffer of the same dimensions. Filters compose by chaining, either
//! directly or through a [`Pipeline`]:
//!
//! ```
//! use aperture_rust::{PixelBuffer, Pixel};
//! use aperture_rust::filters::{blur, edge};
//!
//! let img = PixelBuffer::filled(16, 16, 4, Pixel::rgb(200, 120, 40)).unwrap();
//! let blurred = blur::gaussian_blur(&img, 3).unwrap();
//! let edges = edge::sobel_edge_detection(&blurred).unwrap();
//! assert_eq!(edges.get(8, 8).unwrap(), Pixel::WHITE);
//! ```

pub mod buffer;
pub mod error;
pub mod filters;
pub mod pipeline;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::{Pixel, PixelBuffer};
pub use error::{FilterError, FilterResult};
pub use pipeline::{Filter, Pipeline};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::prelude::*;

    use crate::buffer::{Pixel, PixelBuffer};
    use crate::error::FilterResult;
    use crate::filters::{
        aperture, blur, distortion, edge, grayscale as grayscale_mod, histogram, morphology,
        pixelate as pixelate_mod,
    };

    /// Copy the numpy image into a buffer, run `f`, hand the result back to numpy.
    fn run<'py, F>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        f: F,
    ) -> PyResult<Bound<'py, PyArray3<u8>>>
    where
        F: FnOnce(&PixelBuffer) -> FilterResult<PixelBuffer>,
    {
        let source = PixelBuffer::from_view(image.as_array())?;
        let result = f(&source)?;
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Blur & Aperture Filters
    // ========================================================================

    /// Box blur with a `size` x `size` kernel of ones.
    #[pyfunction]
    pub fn box_blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| blur::box_blur(src, size))
    }

    /// Three cascaded box blurs.
    #[pyfunction]
    pub fn gaussian_blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| blur::gaussian_blur(src, size))
    }

    #[pyfunction]
    pub fn median<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| aperture::median(src, size))
    }

    #[pyfunction]
    pub fn kuwahara<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| aperture::kuwahara(src, size))
    }

    #[pyfunction]
    pub fn snn_blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| aperture::snn_blur(src, size))
    }

    #[pyfunction]
    pub fn dilate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| morphology::dilate(src, size))
    }

    #[pyfunction]
    pub fn erode<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| morphology::erode(src, size))
    }

    #[pyfunction]
    pub fn pixelate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        block_size: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| pixelate_mod::pixelate(src, block_size))
    }

    // ========================================================================
    // Edge Filters
    // ========================================================================

    #[pyfunction]
    pub fn sharpen<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, edge::sharpen)
    }

    #[pyfunction]
    pub fn emboss<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, edge::emboss)
    }

    #[pyfunction]
    pub fn sobel_emboss<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, edge::sobel_emboss)
    }

    /// Sobel edges, dark on white.
    #[pyfunction]
    pub fn sobel_edges<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, edge::sobel_edge_detection)
    }

    /// Laplace edges, dark on white.
    #[pyfunction]
    pub fn laplace_edges<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, edge::laplace_edge_detection)
    }

    /// Paint pixels whose RGB distance to their neighbor exceeds `threshold`.
    #[pyfunction]
    #[pyo3(signature = (image, threshold, edge_color=(0, 0, 0)))]
    pub fn edge_detection<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold: f64,
        edge_color: (u8, u8, u8),
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let color = Pixel::rgb(edge_color.0, edge_color.1, edge_color.2);
        run(py, image, |src| edge::edge_detection(src, threshold, color))
    }

    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, grayscale_mod::grayscale)
    }

    #[pyfunction]
    pub fn invert<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, grayscale_mod::invert)
    }

    // ========================================================================
    // Tonal & Distortion
    // ========================================================================

    #[pyfunction]
    pub fn equalize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, histogram::equalize)
    }

    #[pyfunction]
    #[pyo3(signature = (image, roughness, power, seed=0))]
    pub fn turbulence<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        roughness: u32,
        power: f32,
        seed: u64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| distortion::turbulence(src, roughness, power, seed))
    }

    #[pyfunction]
    #[pyo3(signature = (image, amplitude, frequency, x_dir=true, y_dir=false))]
    pub fn sin_wave<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        amplitude: f32,
        frequency: f32,
        x_dir: bool,
        y_dir: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| {
            distortion::sin_wave(src, amplitude, frequency, x_dir, y_dir)
        })
    }

    #[pyfunction]
    #[pyo3(signature = (image, size, seed=0))]
    pub fn jitter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
        seed: u64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, |src| distortion::jitter(src, size, seed))
    }

    /// Aperture Rust extension module
    #[pymodule]
    pub fn aperture_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Blur & aperture filters
        m.add_function(wrap_pyfunction!(box_blur, m)?)?;
        m.add_function(wrap_pyfunction!(gaussian_blur, m)?)?;
        m.add_function(wrap_pyfunction!(median, m)?)?;
        m.add_function(wrap_pyfunction!(kuwahara, m)?)?;
        m.add_function(wrap_pyfunction!(snn_blur, m)?)?;
        m.add_function(wrap_pyfunction!(dilate, m)?)?;
        m.add_function(wrap_pyfunction!(erode, m)?)?;
        m.add_function(wrap_pyfunction!(pixelate, m)?)?;

        // Edge filters
        m.add_function(wrap_pyfunction!(sharpen, m)?)?;
        m.add_function(wrap_pyfunction!(emboss, m)?)?;
        m.add_function(wrap_pyfunction!(sobel_emboss, m)?)?;
        m.add_function(wrap_pyfunction!(sobel_edges, m)?)?;
        m.add_function(wrap_pyfunction!(laplace_edges, m)?)?;
        m.add_function(wrap_pyfunction!(edge_detection, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(invert, m)?)?;

        // Tonal & distortion
        m.add_function(wrap_pyfunction!(equalize, m)?)?;
        m.add_function(wrap_pyfunction!(turbulence, m)?)?;
        m.add_function(wrap_pyfunction!(sin_wave, m)?)?;
        m.add_function(wrap_pyfunction!(jitter, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::aperture_rust;
