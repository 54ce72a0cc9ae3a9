//! Cross-filter properties checked through the public API.

use aperture_rust::filters::kernel::ConvolutionKernel;
use aperture_rust::filters::{
    aperture, blur, distortion, edge, grayscale, histogram, morphology, pixelate,
};
use aperture_rust::{Filter, Pipeline, Pixel, PixelBuffer};

fn gradient(width: u32, height: u32, channels: usize) -> PixelBuffer {
    let mut img = PixelBuffer::new(width, height, channels).unwrap();
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let r = ((x * 37 + y * 11) % 256) as u8;
            let g = ((x * 7 + y * 53) % 256) as u8;
            let b = ((x * y + 17) % 256) as u8;
            img.set(x, y, Pixel::rgba(r, g, b, (x % 256) as u8)).unwrap();
        }
    }
    img
}

fn checkerboard(size: u32) -> PixelBuffer {
    let mut img = PixelBuffer::new(size, size, 3).unwrap();
    for y in 0..size as i64 {
        for x in 0..size as i64 {
            let p = if (x + y) % 2 == 0 { Pixel::WHITE } else { Pixel::BLACK };
            img.set(x, y, p).unwrap();
        }
    }
    img
}

fn every_filter() -> Vec<Filter> {
    vec![
        Filter::BoxBlur { size: 3 },
        Filter::GaussianBlur { size: 3 },
        Filter::Median { size: 3 },
        Filter::Dilate { size: 3 },
        Filter::Erode { size: 3 },
        Filter::Kuwahara { size: 5 },
        Filter::SnnBlur { size: 5 },
        Filter::Pixelate { block_size: 4 },
        Filter::Jitter { size: 4, seed: 9 },
        Filter::Sharpen,
        Filter::Emboss,
        Filter::SobelEmboss,
        Filter::SobelEdges,
        Filter::LaplaceEdges,
        Filter::EdgeDetection {
            threshold: 40.0,
            edge_color: Pixel::BLACK,
        },
        Filter::Equalize,
        Filter::Turbulence {
            roughness: 3,
            power: 6.0,
            seed: 4,
        },
        Filter::SinWave {
            amplitude: 3.0,
            frequency: 0.05,
            x_dir: true,
            y_dir: true,
        },
        Filter::Grayscale,
        Filter::Invert,
    ]
}

#[test]
fn every_filter_preserves_dimensions() {
    for (w, h) in [(1, 1), (7, 7), (640, 480)] {
        let img = gradient(w, h, 4);
        for filter in every_filter() {
            let out = filter.apply(&img).unwrap();
            assert_eq!(
                (out.width(), out.height(), out.channels()),
                (w, h, 4),
                "{} changed the shape of a {w}x{h} image",
                filter.name()
            );
        }
    }
}

#[test]
fn every_filter_is_deterministic() {
    let img = gradient(23, 17, 3);
    for filter in every_filter() {
        let a = filter.apply(&img).unwrap();
        let b = filter.apply(&img).unwrap();
        assert_eq!(a, b, "{} is not deterministic", filter.name());
    }
}

#[test]
fn filters_leave_source_untouched() {
    let img = gradient(12, 9, 4);
    let copy = img.clone();
    Pipeline {
        filters: every_filter(),
    }
    .apply(&img)
    .unwrap();
    assert_eq!(img, copy);
}

#[test]
fn identity_kernel_is_identity() {
    let img = gradient(11, 6, 4);
    for size in [1, 3, 5] {
        let kernel = ConvolutionKernel::identity(size).unwrap();
        assert_eq!(kernel.apply(&img).unwrap(), img);
    }
}

#[test]
fn uniform_image_survives_box_blur_everywhere() {
    let img = PixelBuffer::filled(9, 5, 4, Pixel::rgba(33, 66, 99, 128)).unwrap();
    for size in [1, 2, 3, 7, 15] {
        assert_eq!(blur::box_blur(&img, size).unwrap(), img);
        assert_eq!(blur::gaussian_blur(&img, size).unwrap(), img);
    }
}

#[test]
fn checkerboard_box_blur() {
    let out = blur::box_blur(&checkerboard(4), 3).unwrap();
    assert_eq!(out.get(1, 1).unwrap(), Pixel::rgb(142, 142, 142));
    assert_eq!(out.get(2, 1).unwrap(), Pixel::rgb(113, 113, 113));
    assert_eq!(out.get(0, 0).unwrap(), Pixel::rgb(128, 128, 128));
    assert_eq!(out.get(3, 3).unwrap(), Pixel::rgb(128, 128, 128));
}

#[test]
fn aperture_filters_keep_uniform_images() {
    let img = PixelBuffer::filled(8, 8, 3, Pixel::rgb(12, 200, 77)).unwrap();
    for size in [1, 2, 3, 6] {
        assert_eq!(aperture::median(&img, size).unwrap(), img);
        assert_eq!(aperture::kuwahara(&img, size).unwrap(), img);
        assert_eq!(aperture::snn_blur(&img, size).unwrap(), img);
        assert_eq!(morphology::dilate(&img, size).unwrap(), img);
        assert_eq!(morphology::erode(&img, size).unwrap(), img);
        assert_eq!(pixelate::pixelate(&img, size).unwrap(), img);
    }
}

#[test]
fn median_removes_isolated_speck() {
    let mut img = PixelBuffer::filled(7, 7, 3, Pixel::rgb(40, 40, 40)).unwrap();
    img.set(3, 3, Pixel::WHITE).unwrap();
    let out = aperture::median(&img, 3).unwrap();
    assert_eq!(out.get(3, 3).unwrap(), Pixel::rgb(40, 40, 40));
}

#[test]
fn dilation_and_erosion_bracket_the_source() {
    let img = gradient(15, 10, 3);
    let dilated = morphology::dilate(&img, 4).unwrap();
    let eroded = morphology::erode(&img, 4).unwrap();
    for y in 0..10 {
        for x in 0..15 {
            let p = img.get(x, y).unwrap();
            let d = dilated.get(x, y).unwrap();
            let e = eroded.get(x, y).unwrap();
            for c in 0..3 {
                assert!(e.channel(c) <= p.channel(c));
                assert!(p.channel(c) <= d.channel(c));
            }
        }
    }
}

#[test]
fn sobel_on_uniform_image_is_white_inside() {
    let img = PixelBuffer::filled(10, 10, 4, Pixel::rgba(180, 20, 90, 255)).unwrap();
    let out = edge::sobel_edge_detection(&img).unwrap();
    for y in 1..9 {
        for x in 1..9 {
            assert_eq!(out.get(x, y).unwrap(), Pixel::WHITE);
        }
    }
}

#[test]
fn equalize_is_stable_on_flat_images() {
    let img = PixelBuffer::filled(6, 6, 3, Pixel::rgb(70, 70, 70)).unwrap();
    let once = histogram::equalize(&img).unwrap();
    let twice = histogram::equalize(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn equalize_keeps_a_flat_histogram() {
    // Every value 0..=255 appears exactly once per channel.
    let mut img = PixelBuffer::new(16, 16, 3).unwrap();
    for v in 0..256i64 {
        let (r, g, b) = (v as u8, (255 - v) as u8, ((v * 7) % 256) as u8);
        img.set(v % 16, v / 16, Pixel::rgb(r, g, b)).unwrap();
    }
    let once = histogram::equalize(&img).unwrap();
    assert_eq!(once, img);
    assert_eq!(histogram::equalize(&once).unwrap(), once);
}

#[test]
fn grayscale_then_invert_round_trips() {
    let gray = grayscale::grayscale(&gradient(9, 9, 4)).unwrap();
    let back = grayscale::invert(&grayscale::invert(&gray).unwrap()).unwrap();
    assert_eq!(back, gray);
}

#[test]
fn seeded_distortions_depend_on_seed() {
    let img = gradient(32, 32, 3);
    let a = distortion::jitter(&img, 5, 1).unwrap();
    let b = distortion::jitter(&img, 5, 2).unwrap();
    assert_ne!(a, b);

    let a = distortion::turbulence(&img, 3, 8.0, 1).unwrap();
    let b = distortion::turbulence(&img, 3, 8.0, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn zero_sizes_are_rejected() {
    let img = gradient(4, 4, 3);
    for filter in [
        Filter::BoxBlur { size: 0 },
        Filter::GaussianBlur { size: 0 },
        Filter::Median { size: 0 },
        Filter::Dilate { size: 0 },
        Filter::Erode { size: 0 },
        Filter::Kuwahara { size: 0 },
        Filter::SnnBlur { size: 0 },
        Filter::Pixelate { block_size: 0 },
        Filter::Jitter { size: 0, seed: 0 },
    ] {
        assert!(filter.apply(&img).is_err(), "{} accepted size 0", filter.name());
    }
}
