use crate::config::FilterOptions;
use crate::error::Result;
use crate::models::PixelBuffer;
use rayon::prelude::*;

/// Number of intensity levels in an 8-bit channel
pub const LEVELS: usize = 256;

/// 256-bin intensity frequency table
///
/// Bin `i` counts the pixels whose first channel equals `i`. The buffer is
/// expected to be grayscale already, so R is the intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Histogram {
    /// Histogram from precomputed counts
    pub fn from_counts(counts: [u64; LEVELS]) -> Self {
        Self { counts }
    }

    /// Count every pixel of `buffer` once, using its R channel as the bin
    pub fn build(buffer: &PixelBuffer) -> Result<Self> {
        Self::build_with(buffer, FilterOptions::default())
    }

    /// `build` with explicit scheduling
    ///
    /// The parallel path counts rows into per-worker tables that are summed
    /// at the end, so both paths yield identical counts.
    pub fn build_with(buffer: &PixelBuffer, options: FilterOptions) -> Result<Self> {
        buffer.check_bounds()?;

        let counts = if options.parallelism.use_parallel(buffer.pixel_count()) {
            (0..buffer.height())
                .into_par_iter()
                .fold(
                    || [0u64; LEVELS],
                    |mut local, y| {
                        count_row(buffer.row(y), &mut local);
                        local
                    },
                )
                .reduce(
                    || [0u64; LEVELS],
                    |mut a, b| {
                        for (dst, src) in a.iter_mut().zip(b.iter()) {
                            *dst += src;
                        }
                        a
                    },
                )
        } else {
            let mut counts = [0u64; LEVELS];
            for row in buffer.rows() {
                count_row(row, &mut counts);
            }
            counts
        };

        let histogram = Self { counts };
        log::trace!(
            "histogram built for {}x{}: {} pixels",
            buffer.width(),
            buffer.height(),
            histogram.total()
        );
        Ok(histogram)
    }

    /// All 256 bins
    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Count for a single intensity level
    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Sum of all bins
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Mean intensity, `None` for an empty histogram
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: u64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(level, &count)| level as u64 * count)
            .sum();
        Some(weighted as f64 / total as f64)
    }

    /// Add another histogram's counts into this one
    pub fn merge(&mut self, other: &Histogram) {
        for (dst, src) in self.counts.iter_mut().zip(other.counts.iter()) {
            *dst += src;
        }
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::from_counts([0; LEVELS])
    }
}

#[inline]
fn count_row(row: &[u8], counts: &mut [u64; LEVELS]) {
    for px in row.chunks_exact(3) {
        counts[px[0] as usize] += 1;
    }
}
