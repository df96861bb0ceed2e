//! Convert RGB pixels to BT.601 luma
//! Y = round(0.299*R + 0.587*G + 0.114*B)
//! Uses exact integer arithmetic: Y = (299*R + 587*G + 114*B + 500) / 1000
//!
//! The three output channels all carry Y, so the result is still an RGB
//! buffer and converting it again is a no-op.

use crate::config::FilterOptions;
use crate::error::Result;
use crate::models::PixelBuffer;
use crate::utils::parallel::fill_rows;

/// Coefficients for grayscale conversion, scaled by 1000
const COEF_R: u32 = 299;
const COEF_G: u32 = 587;
const COEF_B: u32 = 114;
const COEF_SCALE: u32 = 1000;

/// Luma of a single RGB triplet, rounded half up
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32;
    // Max is 255_000 + 500, so the quotient never exceeds 255
    ((weighted + COEF_SCALE / 2) / COEF_SCALE) as u8
}

/// Grayscale copy of `buffer` with identical geometry
pub fn grayscale(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    grayscale_with(buffer, FilterOptions::default())
}

/// `grayscale` with explicit scheduling
pub fn grayscale_with(buffer: &PixelBuffer, options: FilterOptions) -> Result<PixelBuffer> {
    buffer.check_bounds()?;
    log::debug!("grayscale {}x{}", buffer.width(), buffer.height());

    let parallel = options.parallelism.use_parallel(buffer.pixel_count());
    let mut out = buffer.blank_like();
    fill_rows(&mut out, parallel, |y, row| {
        for (dst, src) in row.chunks_exact_mut(3).zip(buffer.row(y).chunks_exact(3)) {
            dst.fill(luma(src[0], src[1], src[2]));
        }
    });
    Ok(out)
}

/// Single-channel luma plane, one byte per pixel, row-major and packed
pub fn luma_plane(buffer: &PixelBuffer) -> Vec<u8> {
    let mut plane = Vec::with_capacity(buffer.pixel_count());
    for row in buffer.rows() {
        plane.extend(row.chunks_exact(3).map(|px| luma(px[0], px[1], px[2])));
    }
    plane
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights() {
        // Pure white / black
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(0, 0, 0), 0);

        // Pure primaries: 76.245, 149.685, 29.07
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);

        // 0.299*100 + 0.587*50 + 0.114*200 = 82.15
        assert_eq!(luma(100, 50, 200), 82);
    }

    #[test]
    fn test_luma_rounds_half_up() {
        // 0.299*5 + 0.587*0 + 0.114*0 = 1.495, 0.114*5 = 0.57
        assert_eq!(luma(5, 0, 0), 1);
        assert_eq!(luma(0, 0, 5), 1);
        // 0.299*1 + 0.114*2 = 0.527
        assert_eq!(luma(1, 0, 2), 1);
    }

    #[test]
    fn test_grayscale_sets_all_channels() {
        let img = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let buf = PixelBuffer::from_rgb(2, 2, img).unwrap();
        let gray = grayscale(&buf).unwrap();

        assert_eq!(gray.width(), 2);
        assert_eq!(gray.height(), 2);
        assert_eq!(gray.pixel(0, 0), Some([76, 76, 76]));
        assert_eq!(gray.pixel(1, 0), Some([150, 150, 150]));
        assert_eq!(gray.pixel(0, 1), Some([29, 29, 29]));
        assert_eq!(gray.pixel(1, 1), Some([255, 255, 255]));
        // Source untouched
        assert_eq!(buf.pixel(0, 0), Some([255, 0, 0]));
    }

    #[test]
    fn test_grayscale_idempotent() {
        let mut data = Vec::new();
        for i in 0..30u32 {
            data.extend_from_slice(&[(i * 7) as u8, (i * 13) as u8, (255 - i * 5) as u8]);
        }
        let buf = PixelBuffer::from_rgb(6, 5, data).unwrap();
        let once = grayscale(&buf).unwrap();
        let twice = grayscale(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_luma_plane() {
        let buf = PixelBuffer::from_rgb(2, 1, vec![255, 0, 0, 10, 10, 10]).unwrap();
        assert_eq!(luma_plane(&buf), vec![76, 10]);
    }
}
