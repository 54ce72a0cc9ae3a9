//! Histogram equalization.
//!
//! Channels are equalized independently: each of R, G and B gets its own
//! cumulative histogram and lookup table. There is no luminance coupling.

use tracing::debug;

use crate::buffer::{Pixel, PixelBuffer};
use crate::error::FilterResult;

/// Per-channel cumulative histograms of a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    cumulative: [[u64; 256]; 3],
    total: u64,
}

impl Histogram {
    /// Counts every RGB sample of `source` and accumulates the counts.
    pub fn new(source: &PixelBuffer) -> Self {
        let mut cumulative = [[0u64; 256]; 3];
        for y in 0..source.height() as usize {
            for x in 0..source.width() as usize {
                let p = source.pixel(x, y);
                for (c, counts) in cumulative.iter_mut().enumerate() {
                    counts[p.channel(c) as usize] += 1;
                }
            }
        }
        for counts in cumulative.iter_mut() {
            for i in 1..256 {
                counts[i] += counts[i - 1];
            }
        }
        Histogram {
            cumulative,
            total: source.width() as u64 * source.height() as u64,
        }
    }

    /// Number of samples of `channel` (0 = R, 1 = G, 2 = B) at or below
    /// `value`, or `None` for any other channel index.
    pub fn cumulative(&self, channel: usize, value: u8) -> Option<u64> {
        self.cumulative
            .get(channel)
            .map(|counts| counts[value as usize])
    }

    /// Lookup table `cumulative * 255 / total` for one channel, or `None`
    /// when `channel` is not 0, 1 or 2.
    pub fn lookup_table(&self, channel: usize) -> Option<[u8; 256]> {
        self.cumulative.get(channel).map(|counts| self.table(counts))
    }

    fn table(&self, counts: &[u64; 256]) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (v, out) in lut.iter_mut().enumerate() {
            *out = (counts[v] * 255 / self.total).min(255) as u8;
        }
        lut
    }
}

/// Equalize the histogram of each color channel.
///
/// # Returns
/// Remapped buffer, alpha preserved
pub fn equalize(source: &PixelBuffer) -> FilterResult<PixelBuffer> {
    debug!(width = source.width(), height = source.height(), "equalize");

    let histogram = Histogram::new(source);
    let luts = histogram.cumulative.map(|counts| histogram.table(&counts));

    source.map_pixels(|x, y| {
        let p = source.pixel(x, y);
        Pixel::rgba(
            luts[0][p.r as usize],
            luts[1][p.g as usize],
            luts[2][p.b as usize],
            p.a,
        )
    })
}
