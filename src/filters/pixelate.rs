//! Pixelate: block averaging over a non-overlapping grid.

use tracing::debug;

use super::mean_u8;
use crate::buffer::{Pixel, PixelBuffer};
use crate::error::{ensure_size, FilterResult};

/// Replace every `block_size` x `block_size` grid cell with its mean color.
///
/// Blocks start at the top-left corner; blocks on the right and bottom edges
/// are clipped to the image and averaged over the pixels they contain.
/// Alpha is averaged along with the color channels.
pub fn pixelate(source: &PixelBuffer, block_size: u32) -> FilterResult<PixelBuffer> {
    ensure_size("block size", block_size)?;
    debug!(width = source.width(), height = source.height(), block_size, "pixelate");

    let (width, height) = (source.width() as usize, source.height() as usize);
    let bs = block_size as usize;
    let blocks_x = width.div_ceil(bs);
    let blocks_y = height.div_ceil(bs);

    let mut means = Vec::with_capacity(blocks_x * blocks_y);
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let mut sums = [0u64; 4];
            let mut count = 0u64;
            for y in by * bs..((by + 1) * bs).min(height) {
                for x in bx * bs..((bx + 1) * bs).min(width) {
                    let p = source.pixel(x, y);
                    sums[0] += p.r as u64;
                    sums[1] += p.g as u64;
                    sums[2] += p.b as u64;
                    sums[3] += p.a as u64;
                    count += 1;
                }
            }
            let [r, g, b, a] = sums.map(|s| mean_u8(s, count));
            means.push(Pixel::rgba(r, g, b, a));
        }
    }

    source.map_pixels(|x, y| means[(y / bs) * blocks_x + x / bs])
}
