//! Deterministic randomness: a seeded RNG and coherent noise fields.
//!
//! Both are pure functions of their seed (and, for per-pixel streams, the
//! pixel coordinate), so parallel row processing produces the same output as
//! a sequential pass.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

use crate::error::{FilterError, FilterResult};

// ============================================================================
// Hashing
// ============================================================================

#[inline]
fn hash_u32(mut x: u32) -> u32 {
    x = x.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

#[inline]
fn hash_coords(x: i64, y: i64, seed: u64) -> u32 {
    let folded_seed = (seed ^ (seed >> 32)) as u32;
    hash_u32(
        (x as u32)
            .wrapping_mul(374761393)
            .wrapping_add((y as u32).wrapping_mul(668265263))
            .wrapping_add(hash_u32(folded_seed)),
    )
}

// ============================================================================
// Simple RNG
// ============================================================================

/// Simple linear congruential generator for deterministic noise.
/// Uses MINSTD parameters.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_add(1), // Avoid zero
        }
    }

    /// Independent stream for one pixel.
    pub fn for_pixel(seed: u64, x: i64, y: i64) -> Self {
        Self::new(hash_coords(x, y, seed) as u64)
    }

    /// Generate next random u32.
    pub fn next_u32(&mut self) -> u32 {
        // MINSTD LCG
        self.state = self.state.wrapping_mul(48271).wrapping_add(1) % 2147483647;
        self.state as u32
    }

    /// Uniform integer in `range`. An empty range yields its start.
    pub fn next_in(&mut self, range: Range<i64>) -> i64 {
        let span = range.end - range.start;
        if span <= 0 {
            return range.start;
        }
        range.start + (self.next_u32() as u64 % span as u64) as i64
    }
}

// ============================================================================
// Coherent noise
// ============================================================================

/// Parameters of a fractal value-noise field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Scale applied to the normalized [-1, 1] field.
    pub amplitude: f32,
    /// Lattice cells per pixel for the first octave.
    pub frequency: f32,
    /// Number of octaves; each halves the amplitude and doubles the frequency.
    pub octaves: u32,
    pub seed: u64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        NoiseSettings {
            amplitude: 1.0,
            frequency: 1.0 / 32.0,
            octaves: 4,
            seed: 0,
        }
    }
}

impl NoiseSettings {
    fn validate(&self) -> FilterResult<()> {
        if self.octaves == 0 {
            return Err(FilterError::invalid("noise needs at least one octave"));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(FilterError::invalid(format!(
                "noise frequency must be positive, got {}",
                self.frequency
            )));
        }
        if !self.amplitude.is_finite() {
            return Err(FilterError::invalid("noise amplitude must be finite"));
        }
        Ok(())
    }
}

/// Lattice value in [-1, 1).
#[inline]
fn lattice(x: i64, y: i64, seed: u64) -> f32 {
    (hash_coords(x, y, seed) & 0x00FF_FFFF) as f32 / 8_388_608.0 - 1.0
}

/// Smoothly interpolated value noise, in [-1, 1].
fn value_noise(x: f32, y: f32, seed: u64) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let (xi, yi) = (x0 as i64, y0 as i64);

    let fade = |t: f32| t * t * t * (t * (t * 6.0 - 15.0) + 10.0);
    let u = fade(x - x0);
    let v = fade(y - y0);

    let n00 = lattice(xi, yi, seed);
    let n10 = lattice(xi + 1, yi, seed);
    let n01 = lattice(xi, yi + 1, seed);
    let n11 = lattice(xi + 1, yi + 1, seed);

    let nx0 = n00 + u * (n10 - n00);
    let nx1 = n01 + u * (n11 - n01);
    nx0 + v * (nx1 - nx0)
}

/// Multi-octave value noise at one point, normalized to [-1, 1].
fn fractal_noise(x: f32, y: f32, settings: &NoiseSettings) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = settings.frequency;
    let mut max_amplitude = 0.0f32;

    for octave in 0..settings.octaves {
        let seed = settings.seed.wrapping_add(octave as u64 * 1013);
        total += value_noise(x * frequency, y * frequency, seed) * amplitude;
        max_amplitude += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    total / max_amplitude
}

/// A width x height grid of coherent noise values.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl NoiseField {
    /// Generates the field; values lie in `[-amplitude, amplitude]`.
    pub fn generate(width: u32, height: u32, settings: &NoiseSettings) -> FilterResult<Self> {
        settings.validate()?;
        if width == 0 || height == 0 {
            return Err(FilterError::invalid(format!(
                "noise field dimensions must be non-zero, got {width}x{height}"
            )));
        }
        debug!(
            width,
            height,
            octaves = settings.octaves,
            frequency = settings.frequency,
            seed = settings.seed,
            "noise field"
        );

        let (width, height) = (width as usize, height as usize);
        let mut values = vec![0.0f32; width * height];
        values
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, v) in row.iter_mut().enumerate() {
                    *v = fractal_noise(x as f32, y as f32, settings) * settings.amplitude;
                }
            });

        Ok(NoiseField { width, height, values })
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y * self.width + x])
    }

    #[inline]
    pub(crate) fn value(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rng_deterministic() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..10 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_rng_range() {
        let mut rng = SimpleRng::for_pixel(7, 3, 4);
        for _ in 0..200 {
            let v = rng.next_in(-2..2);
            assert!((-2..2).contains(&v));
        }
        assert_eq!(rng.next_in(0..0), 0);
    }

    #[test]
    fn test_field_is_deterministic() {
        let settings = NoiseSettings {
            seed: 99,
            ..Default::default()
        };
        let a = NoiseField::generate(40, 30, &settings).unwrap();
        let b = NoiseField::generate(40, 30, &settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_field() {
        let first = NoiseSettings {
            seed: 1,
            ..Default::default()
        };
        let second = NoiseSettings {
            seed: 2,
            ..Default::default()
        };
        let a = NoiseField::generate(32, 32, &first).unwrap();
        let b = NoiseField::generate(32, 32, &second).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_within_amplitude() {
        let settings = NoiseSettings {
            amplitude: 3.0,
            octaves: 5,
            seed: 4,
            ..Default::default()
        };
        let field = NoiseField::generate(50, 20, &settings).unwrap();
        for y in 0..20 {
            for x in 0..50 {
                let v = field.get(x, y).unwrap();
                assert!(v.abs() <= 3.0 + 1e-4, "value {v} at ({x}, {y})");
            }
        }
        assert_eq!(field.get(50, 0), None);
    }

    #[test]
    fn test_single_octave_hits_lattice_at_origin() {
        let settings = NoiseSettings {
            amplitude: 2.0,
            octaves: 1,
            seed: 17,
            ..Default::default()
        };
        let field = NoiseField::generate(4, 4, &settings).unwrap();
        assert_relative_eq!(field.get(0, 0).unwrap(), lattice(0, 0, 17) * 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_field_is_smooth() {
        let settings = NoiseSettings {
            octaves: 1,
            seed: 8,
            ..Default::default()
        };
        let field = NoiseField::generate(64, 1, &settings).unwrap();
        for x in 0..63 {
            let d = field.get(x + 1, 0).unwrap() - field.get(x, 0).unwrap();
            assert!(d.abs() < 0.2, "step {d} at {x}");
        }
    }

    #[test]
    fn test_invalid_settings() {
        let zero_octaves = NoiseSettings { octaves: 0, ..Default::default() };
        assert!(NoiseField::generate(4, 4, &zero_octaves).is_err());
        let bad_freq = NoiseSettings { frequency: 0.0, ..Default::default() };
        assert!(NoiseField::generate(4, 4, &bad_freq).is_err());
        assert!(NoiseField::generate(0, 4, &NoiseSettings::default()).is_err());
    }
}
