//! Displacement filters: Turbulence, Sine Wave, Jitter.
//!
//! Each destination pixel copies one source pixel (alpha included) from a
//! displaced coordinate. Displaced coordinates are rounded and clamped into
//! the image.

use std::f32::consts::PI;

use tracing::debug;

use super::aperture::aperture_range;
use super::noise::{NoiseField, NoiseSettings, SimpleRng};
use crate::buffer::PixelBuffer;
use crate::error::{ensure_size, FilterError, FilterResult};

fn ensure_finite(name: &str, value: f32) -> FilterResult<()> {
    if !value.is_finite() {
        return Err(FilterError::invalid(format!("{name} must be finite, got {value}")));
    }
    Ok(())
}

/// Displace pixels along two coherent noise fields.
///
/// # Arguments
/// * `source` - RGB or RGBA buffer
/// * `roughness` - Noise octaves (at least 1); more octaves add finer detail
/// * `power` - Maximum displacement in pixels
/// * `seed` - Seed of the X field; the Y field uses `seed * 2`
///
/// # Returns
/// Distorted buffer with the same dimensions
pub fn turbulence(
    source: &PixelBuffer,
    roughness: u32,
    power: f32,
    seed: u64,
) -> FilterResult<PixelBuffer> {
    ensure_size("roughness", roughness)?;
    ensure_finite("power", power)?;
    debug!(
        width = source.width(),
        height = source.height(),
        roughness,
        power,
        seed,
        "turbulence"
    );

    let base = NoiseSettings {
        octaves: roughness,
        seed,
        ..NoiseSettings::default()
    };
    let field_x = NoiseField::generate(source.width(), source.height(), &base)?;
    let field_y = NoiseField::generate(
        source.width(),
        source.height(),
        &NoiseSettings {
            seed: seed.wrapping_mul(2),
            ..base
        },
    )?;

    source.map_pixels(|x, y| {
        let sx = (x as f32 + field_x.value(x, y) * power).round() as i64;
        let sy = (y as f32 + field_y.value(x, y) * power).round() as i64;
        source.get_clamped(sx, sy)
    })
}

/// Displace pixels along a sine wave.
///
/// With `x_dir`, rows shift horizontally by `amplitude * sin(2*pi*frequency*y)`;
/// with `y_dir`, columns shift vertically by `amplitude * sin(2*pi*frequency*x)`.
///
/// # Arguments
/// * `amplitude` - Peak displacement in pixels
/// * `frequency` - Wave cycles per pixel
pub fn sin_wave(
    source: &PixelBuffer,
    amplitude: f32,
    frequency: f32,
    x_dir: bool,
    y_dir: bool,
) -> FilterResult<PixelBuffer> {
    ensure_finite("amplitude", amplitude)?;
    ensure_finite("frequency", frequency)?;
    debug!(
        width = source.width(),
        height = source.height(),
        amplitude,
        frequency,
        x_dir,
        y_dir,
        "sin_wave"
    );

    let omega = 2.0 * PI * frequency;

    source.map_pixels(|x, y| {
        let mut sx = x as f32;
        let mut sy = y as f32;
        if x_dir {
            sx += amplitude * (omega * y as f32).sin();
        }
        if y_dir {
            sy += amplitude * (omega * x as f32).sin();
        }
        source.get_clamped(sx.round() as i64, sy.round() as i64)
    })
}

/// Scatter pixels randomly within the aperture of `size`.
///
/// Each destination pixel copies a source pixel at a seeded random offset
/// drawn from the same half-open range the aperture filters use.
pub fn jitter(source: &PixelBuffer, size: u32, seed: u64) -> FilterResult<PixelBuffer> {
    ensure_size("jitter size", size)?;
    debug!(width = source.width(), height = source.height(), size, seed, "jitter");

    let range = aperture_range(size);

    source.map_pixels(|x, y| {
        let (x, y) = (x as i64, y as i64);
        let mut rng = SimpleRng::for_pixel(seed, x, y);
        let dx = rng.next_in(range.clone());
        let dy = rng.next_in(range.clone());
        source.get_clamped(x + dx, y + dy)
    })
}
