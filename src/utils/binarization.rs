//! Binarization: fixed thresholds and Otsu's adaptive selection
//!
//! Output pixels are always pure black `(0, 0, 0)` for intensities at or
//! below the cut level and pure white `(255, 255, 255)` above it.

use crate::config::FilterOptions;
use crate::error::{FilterError, Result};
use crate::models::{Histogram, PixelBuffer, Threshold};
use crate::utils::grayscale::{grayscale_with, luma};
use crate::utils::parallel::fill_rows;

const BLACK: u8 = 0;
const WHITE: u8 = 255;

/// Binarize `buffer` against a strength or an explicit level
///
/// Intensity is the pixel's luma, which equals R for grayscale input.
/// A strength outside [0, 1] fails before any output is allocated.
pub fn binarize(buffer: &PixelBuffer, threshold: impl Into<Threshold>) -> Result<PixelBuffer> {
    binarize_with(buffer, threshold, FilterOptions::default())
}

/// `binarize` with explicit scheduling
pub fn binarize_with(
    buffer: &PixelBuffer,
    threshold: impl Into<Threshold>,
    options: FilterOptions,
) -> Result<PixelBuffer> {
    let level = threshold.into().level()?;
    buffer.check_bounds()?;
    log::debug!(
        "binarize {}x{} at level {}",
        buffer.width(),
        buffer.height(),
        level
    );

    let parallel = options.parallelism.use_parallel(buffer.pixel_count());
    let mut out = buffer.blank_like();
    fill_rows(&mut out, parallel, |y, row| {
        for (dst, src) in row.chunks_exact_mut(3).zip(buffer.row(y).chunks_exact(3)) {
            let value = if luma(src[0], src[1], src[2]) <= level {
                BLACK
            } else {
                WHITE
            };
            dst.fill(value);
        }
    });
    Ok(out)
}

/// Otsu's threshold: the level that maximizes inter-class variance
///
/// Scans levels in ascending order. At level `t` the background class holds
/// every pixel at or below `t` and the foreground the rest, so the result is
/// the last background level and matches `binarize`'s `<=` rule. The weights
/// and the background sum accumulate monotonically as the scan advances.
/// Levels with an empty background are skipped and the scan stops once the
/// foreground is empty. Only a strictly greater variance moves the result,
/// so ties resolve to the lowest level. Returns `0` when no level splits
/// the histogram into two non-empty classes.
pub fn select_threshold(histogram: &Histogram, total_pixels: u64) -> Result<u8> {
    if total_pixels == 0 {
        return Err(FilterError::EmptyInput);
    }

    let counts = histogram.counts();
    let total_sum: f64 = counts
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut w_b = 0u64;
    let mut sum_b = 0.0f64;
    let mut max_between = 0.0f64;
    let mut threshold = 0u8;

    for (level, &count) in counts.iter().enumerate() {
        w_b += count;
        sum_b += level as f64 * count as f64;
        if w_b == 0 {
            continue;
        }
        let w_f = total_pixels.saturating_sub(w_b);
        if w_f == 0 {
            break;
        }

        let mean_b = sum_b / w_b as f64;
        let mean_f = (total_sum - sum_b) / w_f as f64;
        let diff = mean_b - mean_f;
        let between = w_b as f64 * w_f as f64 * diff * diff;
        if between > max_between {
            max_between = between;
            threshold = level as u8;
        }
    }

    log::debug!("otsu threshold {} over {} pixels", threshold, total_pixels);
    Ok(threshold)
}

/// Otsu level for `buffer`, computed on its grayscale rendition
pub fn otsu_threshold(buffer: &PixelBuffer) -> Result<u8> {
    otsu_threshold_with(buffer, FilterOptions::default())
}

/// `otsu_threshold` with explicit scheduling
pub fn otsu_threshold_with(buffer: &PixelBuffer, options: FilterOptions) -> Result<u8> {
    let gray = grayscale_with(buffer, options)?;
    let histogram = Histogram::build_with(&gray, options)?;
    select_threshold(&histogram, gray.pixel_count() as u64)
}

/// Grayscale, pick Otsu's level, then binarize the grayscale image
pub fn adaptive_binarize(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    adaptive_binarize_with(buffer, FilterOptions::default())
}

/// `adaptive_binarize` with explicit scheduling
pub fn adaptive_binarize_with(buffer: &PixelBuffer, options: FilterOptions) -> Result<PixelBuffer> {
    let gray = grayscale_with(buffer, options)?;
    let histogram = Histogram::build_with(&gray, options)?;
    let level = select_threshold(&histogram, gray.pixel_count() as u64)?;
    binarize_with(&gray, Threshold::Level(level), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LEVELS;

    fn gray_buffer(values: &[u8], width: usize, height: usize) -> PixelBuffer {
        let data = values.iter().flat_map(|&v| [v, v, v]).collect();
        PixelBuffer::from_rgb(width, height, data).unwrap()
    }

    fn bimodal(low: usize, high: usize, n: u64) -> Histogram {
        let mut counts = [0u64; LEVELS];
        counts[low] = n;
        counts[high] = n;
        Histogram::from_counts(counts)
    }

    #[test]
    fn test_threshold_binarize() {
        let buf = gray_buffer(&[100, 150, 200, 50], 2, 2);
        let binary = binarize(&buf, 128u8).unwrap();

        assert_eq!(binary.pixel(0, 0), Some([0, 0, 0])); // 100 <= 128
        assert_eq!(binary.pixel(1, 0), Some([255, 255, 255])); // 150 > 128
        assert_eq!(binary.pixel(0, 1), Some([255, 255, 255])); // 200 > 128
        assert_eq!(binary.pixel(1, 1), Some([0, 0, 0])); // 50 <= 128
    }

    #[test]
    fn test_level_is_inclusive() {
        let buf = gray_buffer(&[127, 128], 2, 1);
        let binary = binarize(&buf, 127u8).unwrap();
        assert_eq!(binary.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(binary.pixel(1, 0), Some([255, 255, 255]));
    }

    #[test]
    fn test_binarize_uses_luma_for_color() {
        // Pure green has luma 150
        let buf = PixelBuffer::from_rgb(1, 1, vec![0, 255, 0]).unwrap();
        assert_eq!(binarize(&buf, 149u8).unwrap().pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(binarize(&buf, 150u8).unwrap().pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_binarize_strength() {
        // 0.4 -> level 102
        let buf = gray_buffer(&[102, 103], 2, 1);
        let binary = binarize(&buf, Threshold::Strength(0.4)).unwrap();
        assert_eq!(binary.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(binary.pixel(1, 0), Some([255, 255, 255]));
    }

    #[test]
    fn test_binarize_rejects_strength() {
        let buf = gray_buffer(&[10], 1, 1);
        for strength in [-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                binarize(&buf, Threshold::Strength(strength)),
                Err(FilterError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_otsu_bimodal_splits_peaks() {
        let hist = bimodal(10, 240, 1000);
        let t = select_threshold(&hist, 2000).unwrap();
        assert!((10..240).contains(&t), "threshold {t} does not split the peaks");
        // Ties keep the first maximizing level
        assert_eq!(t, 10);
    }

    #[test]
    fn test_otsu_unbalanced_classes() {
        let mut counts = [0u64; LEVELS];
        counts[20] = 300;
        counts[30] = 100;
        counts[200] = 600;
        let t = select_threshold(&Histogram::from_counts(counts), 1000).unwrap();
        // 20 and 30 vs 200 gives the larger separation
        assert_eq!(t, 30);
    }

    #[test]
    fn test_otsu_deterministic() {
        let mut counts = [0u64; LEVELS];
        for (i, c) in counts.iter_mut().enumerate() {
            *c = ((i * 31) % 17) as u64;
        }
        let hist = Histogram::from_counts(counts);
        let total = hist.total();
        let first = select_threshold(&hist, total).unwrap();
        for _ in 0..5 {
            assert_eq!(select_threshold(&hist, total).unwrap(), first);
        }
    }

    #[test]
    fn test_otsu_single_level() {
        let mut counts = [0u64; LEVELS];
        counts[128] = 50;
        assert_eq!(select_threshold(&Histogram::from_counts(counts), 50), Ok(0));
    }

    #[test]
    fn test_otsu_empty() {
        assert_eq!(
            select_threshold(&Histogram::default(), 0),
            Err(FilterError::EmptyInput)
        );
    }

    #[test]
    fn test_adaptive_binarize() {
        // Create a simple two-class image
        let mut values = vec![50u8; 50]; // Dark class
        values.extend(vec![200u8; 50]); // Light class
        let buf = gray_buffer(&values, 10, 10);

        let t = otsu_threshold(&buf).unwrap();
        assert!((50..200).contains(&t));

        let binary = adaptive_binarize(&buf).unwrap();
        assert_eq!(binary.pixel(0, 0), Some([0, 0, 0])); // Dark
        assert_eq!(binary.pixel(0, 7), Some([255, 255, 255])); // Light
    }

    #[test]
    fn test_adaptive_binarize_adjacent_levels() {
        // Two classes one intensity level apart
        let mut values = vec![100u8; 50];
        values.extend(vec![101u8; 50]);
        let buf = gray_buffer(&values, 10, 10);

        assert_eq!(otsu_threshold(&buf), Ok(100));
        let binary = adaptive_binarize(&buf).unwrap();
        assert_eq!(binary.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(binary.pixel(0, 9), Some([255, 255, 255]));
    }

    #[test]
    fn test_adaptive_binarize_dense_histogram() {
        // Every level populated: 10 px per level below 128, 30 px above
        let mut values = Vec::new();
        for level in 0..=255u8 {
            let n = if level < 128 { 10 } else { 30 };
            values.extend(std::iter::repeat(level).take(n));
        }
        let width = 64;
        let height = values.len() / width;
        values.truncate(width * height);
        let buf = gray_buffer(&values, width, height);

        let t = otsu_threshold(&buf).unwrap();
        let binary = adaptive_binarize(&buf).unwrap();
        for (i, &v) in values.iter().enumerate() {
            let expected = if v <= t { [0, 0, 0] } else { [255, 255, 255] };
            assert_eq!(binary.pixel(i % width, i / width), Some(expected), "level {v}");
        }

        // Bin t itself is background and must come out black
        let hist = Histogram::build(&buf).unwrap();
        let black = crate::tools::binary_stats(&binary).black_pixels as u64;
        let background: u64 = hist.counts()[..=t as usize].iter().sum();
        assert!(hist.count(t) > 0);
        assert_eq!(black, background);
    }
}
