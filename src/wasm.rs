//! WebAssembly exports for the aperture filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Every export
//! takes a flat RGBA byte array (length = width * height * 4, as produced by
//! `ImageData.data`) and returns a new one. Invalid arguments surface as a
//! thrown JavaScript `Error`.

use wasm_bindgen::prelude::*;

use crate::buffer::{Pixel, PixelBuffer};
use crate::error::FilterResult;
use crate::filters::{aperture, blur, distortion, edge, histogram, morphology, pixelate};

fn run<F>(data: &[u8], width: u32, height: u32, f: F) -> Result<Vec<u8>, JsError>
where
    F: FnOnce(&PixelBuffer) -> FilterResult<PixelBuffer>,
{
    let source = PixelBuffer::from_raw(width, height, 4, data.to_vec())?;
    Ok(f(&source)?.into_raw())
}

// ============================================================================
// Blur & Aperture Filters
// ============================================================================

#[wasm_bindgen]
pub fn box_blur_wasm(data: &[u8], width: u32, height: u32, size: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| blur::box_blur(src, size))
}

#[wasm_bindgen]
pub fn gaussian_blur_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    size: u32,
) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| blur::gaussian_blur(src, size))
}

#[wasm_bindgen]
pub fn median_wasm(data: &[u8], width: u32, height: u32, size: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| aperture::median(src, size))
}

#[wasm_bindgen]
pub fn kuwahara_wasm(data: &[u8], width: u32, height: u32, size: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| aperture::kuwahara(src, size))
}

#[wasm_bindgen]
pub fn snn_blur_wasm(data: &[u8], width: u32, height: u32, size: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| aperture::snn_blur(src, size))
}

#[wasm_bindgen]
pub fn dilate_wasm(data: &[u8], width: u32, height: u32, size: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| morphology::dilate(src, size))
}

#[wasm_bindgen]
pub fn erode_wasm(data: &[u8], width: u32, height: u32, size: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| morphology::erode(src, size))
}

#[wasm_bindgen]
pub fn pixelate_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    block_size: u32,
) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| pixelate::pixelate(src, block_size))
}

// ============================================================================
// Edge Filters
// ============================================================================

#[wasm_bindgen]
pub fn sharpen_wasm(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, edge::sharpen)
}

#[wasm_bindgen]
pub fn emboss_wasm(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, edge::emboss)
}

#[wasm_bindgen]
pub fn sobel_emboss_wasm(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, edge::sobel_emboss)
}

#[wasm_bindgen]
pub fn sobel_edges_wasm(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, edge::sobel_edge_detection)
}

#[wasm_bindgen]
pub fn laplace_edges_wasm(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, edge::laplace_edge_detection)
}

/// Threshold edge detection; `edge_color` is packed as `0xRRGGBB`.
#[wasm_bindgen]
pub fn edge_detection_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    threshold: f64,
    edge_color: u32,
) -> Result<Vec<u8>, JsError> {
    let color = Pixel::rgb(
        (edge_color >> 16) as u8,
        (edge_color >> 8) as u8,
        edge_color as u8,
    );
    run(data, width, height, |src| edge::edge_detection(src, threshold, color))
}

// ============================================================================
// Tonal & Distortion
// ============================================================================

#[wasm_bindgen]
pub fn equalize_wasm(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsError> {
    run(data, width, height, histogram::equalize)
}

#[wasm_bindgen]
pub fn turbulence_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    roughness: u32,
    power: f32,
    seed: u32,
) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| {
        distortion::turbulence(src, roughness, power, seed as u64)
    })
}

#[wasm_bindgen]
pub fn sin_wave_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    amplitude: f32,
    frequency: f32,
    x_dir: bool,
    y_dir: bool,
) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| {
        distortion::sin_wave(src, amplitude, frequency, x_dir, y_dir)
    })
}

#[wasm_bindgen]
pub fn jitter_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    size: u32,
    seed: u32,
) -> Result<Vec<u8>, JsError> {
    run(data, width, height, |src| distortion::jitter(src, size, seed as u64))
}
