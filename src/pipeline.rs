//! Filter chains as data.
//!
//! [`Filter`] names every operation in the crate together with its
//! parameters, and [`Pipeline`] applies a sequence of them. Both deserialize
//! with serde, so a chain can come from a configuration file:
//!
//! ```
//! use aperture_rust::{Pipeline, PixelBuffer, Pixel};
//!
//! let pipeline: Pipeline = serde_json::from_str(r#"{
//!     "filters": [
//!         { "filter": "gaussian_blur", "size": 3 },
//!         { "filter": "sobel_edges" }
//!     ]
//! }"#).unwrap();
//!
//! let img = PixelBuffer::filled(8, 8, 4, Pixel::rgb(10, 20, 30)).unwrap();
//! let out = pipeline.apply(&img).unwrap();
//! assert_eq!(out.width(), 8);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::{Pixel, PixelBuffer};
use crate::error::FilterResult;
use crate::filters::{aperture, blur, distortion, edge, grayscale, histogram, morphology, pixelate};

fn default_true() -> bool {
    true
}

/// One filter invocation with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum Filter {
    BoxBlur { size: u32 },
    GaussianBlur { size: u32 },
    Median { size: u32 },
    Dilate { size: u32 },
    Erode { size: u32 },
    Kuwahara { size: u32 },
    SnnBlur { size: u32 },
    Pixelate { block_size: u32 },
    Jitter {
        size: u32,
        #[serde(default)]
        seed: u64,
    },
    Sharpen,
    Emboss,
    SobelEmboss,
    SobelEdges,
    LaplaceEdges,
    EdgeDetection { threshold: f64, edge_color: Pixel },
    Equalize,
    Turbulence {
        roughness: u32,
        power: f32,
        #[serde(default)]
        seed: u64,
    },
    SinWave {
        amplitude: f32,
        frequency: f32,
        #[serde(default = "default_true")]
        x_dir: bool,
        #[serde(default)]
        y_dir: bool,
    },
    Grayscale,
    Invert,
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Filter::BoxBlur { .. } => "box_blur",
            Filter::GaussianBlur { .. } => "gaussian_blur",
            Filter::Median { .. } => "median",
            Filter::Dilate { .. } => "dilate",
            Filter::Erode { .. } => "erode",
            Filter::Kuwahara { .. } => "kuwahara",
            Filter::SnnBlur { .. } => "snn_blur",
            Filter::Pixelate { .. } => "pixelate",
            Filter::Jitter { .. } => "jitter",
            Filter::Sharpen => "sharpen",
            Filter::Emboss => "emboss",
            Filter::SobelEmboss => "sobel_emboss",
            Filter::SobelEdges => "sobel_edges",
            Filter::LaplaceEdges => "laplace_edges",
            Filter::EdgeDetection { .. } => "edge_detection",
            Filter::Equalize => "equalize",
            Filter::Turbulence { .. } => "turbulence",
            Filter::SinWave { .. } => "sin_wave",
            Filter::Grayscale => "grayscale",
            Filter::Invert => "invert",
        }
    }

    pub fn apply(&self, source: &PixelBuffer) -> FilterResult<PixelBuffer> {
        match *self {
            Filter::BoxBlur { size } => blur::box_blur(source, size),
            Filter::GaussianBlur { size } => blur::gaussian_blur(source, size),
            Filter::Median { size } => aperture::median(source, size),
            Filter::Dilate { size } => morphology::dilate(source, size),
            Filter::Erode { size } => morphology::erode(source, size),
            Filter::Kuwahara { size } => aperture::kuwahara(source, size),
            Filter::SnnBlur { size } => aperture::snn_blur(source, size),
            Filter::Pixelate { block_size } => pixelate::pixelate(source, block_size),
            Filter::Jitter { size, seed } => distortion::jitter(source, size, seed),
            Filter::Sharpen => edge::sharpen(source),
            Filter::Emboss => edge::emboss(source),
            Filter::SobelEmboss => edge::sobel_emboss(source),
            Filter::SobelEdges => edge::sobel_edge_detection(source),
            Filter::LaplaceEdges => edge::laplace_edge_detection(source),
            Filter::EdgeDetection {
                threshold,
                edge_color,
            } => edge::edge_detection(source, threshold, edge_color),
            Filter::Equalize => histogram::equalize(source),
            Filter::Turbulence {
                roughness,
                power,
                seed,
            } => distortion::turbulence(source, roughness, power, seed),
            Filter::SinWave {
                amplitude,
                frequency,
                x_dir,
                y_dir,
            } => distortion::sin_wave(source, amplitude, frequency, x_dir, y_dir),
            Filter::Grayscale => grayscale::grayscale(source),
            Filter::Invert => grayscale::invert(source),
        }
    }
}

/// An ordered chain of filters; each step reads the previous step's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub filters: Vec<Filter>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn then(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Runs every step in order. An empty pipeline returns a copy of `source`.
    pub fn apply(&self, source: &PixelBuffer) -> FilterResult<PixelBuffer> {
        let mut current = source.clone();
        for (step, filter) in self.filters.iter().enumerate() {
            debug!(step, filter = filter.name(), "pipeline step");
            current = filter.apply(&current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    fn sample() -> PixelBuffer {
        let mut img = PixelBuffer::new(9, 9, 4).unwrap();
        for y in 0..9i64 {
            for x in 0..9i64 {
                let v = ((x * 29 + y * 13) % 256) as u8;
                img.set(x, y, Pixel::rgba(v, v / 2, 255 - v, 255)).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_pipeline_matches_manual_chain() {
        let img = sample();
        let pipeline = Pipeline::new()
            .then(Filter::Median { size: 3 })
            .then(Filter::Sharpen)
            .then(Filter::Equalize);

        let manual = histogram::equalize(
            &edge::sharpen(&aperture::median(&img, 3).unwrap()).unwrap(),
        )
        .unwrap();
        assert_eq!(pipeline.apply(&img).unwrap(), manual);
    }

    #[test]
    fn test_empty_pipeline_copies() {
        let img = sample();
        assert_eq!(Pipeline::new().apply(&img).unwrap(), img);
    }

    #[test]
    fn test_pipeline_stops_on_error() {
        let img = sample();
        let pipeline = Pipeline::new()
            .then(Filter::Invert)
            .then(Filter::BoxBlur { size: 0 });
        assert!(matches!(
            pipeline.apply(&img),
            Err(FilterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "filters": [
                { "filter": "snn_blur", "size": 5 },
                { "filter": "turbulence", "roughness": 3, "power": 4.0 },
                { "filter": "sin_wave", "amplitude": 2.0, "frequency": 0.1 },
                { "filter": "edge_detection", "threshold": 30.0,
                  "edge_color": { "r": 255, "g": 0, "b": 0 } },
                { "filter": "laplace_edges" }
            ]
        }"#;
        let pipeline: Pipeline = serde_json::from_str(json).unwrap();
        assert_eq!(
            pipeline.filters,
            vec![
                Filter::SnnBlur { size: 5 },
                Filter::Turbulence {
                    roughness: 3,
                    power: 4.0,
                    seed: 0
                },
                Filter::SinWave {
                    amplitude: 2.0,
                    frequency: 0.1,
                    x_dir: true,
                    y_dir: false
                },
                Filter::EdgeDetection {
                    threshold: 30.0,
                    edge_color: Pixel::rgb(255, 0, 0)
                },
                Filter::LaplaceEdges,
            ]
        );
    }

    #[test]
    fn test_serialize_round_trip_names() {
        let filter = Filter::Pixelate { block_size: 4 };
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"{"filter":"pixelate","block_size":4}"#);
        assert_eq!(filter.name(), "pixelate");
    }
}
