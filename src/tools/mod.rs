use crate::error::FilterError;
use crate::models::PixelBuffer;
use crate::utils::grayscale::luma_plane;
use image::{GenericImageView, RgbImage};
use std::env;
use std::path::Path;
use thiserror::Error;

/// Errors from the image-file bridge
#[derive(Debug, Error)]
pub enum ToolError {
    /// Decoding or encoding failed
    #[error(transparent)]
    Image(#[from] image::ImageError),
    /// The decoded image could not be wrapped or filtered
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// Dimensions do not fit the `image` crate's u32 sizes
    #[error("buffer of {width}x{height} is too large to encode")]
    TooLarge {
        /// Width in pixels
        width: usize,
        /// Height in pixels
        height: usize,
    },
}

fn max_dim_from_env() -> Option<u32> {
    match env::var("PIXF_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image file as a packed RGB buffer.
///
/// When `PIXF_MAX_DIM` is set, images whose longer side exceeds it are
/// downscaled first.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, ToolError> {
    let img = image::open(path)?;
    let rgb = if let Some(max_dim) = max_dim_from_env() {
        let (orig_w, orig_h) = img.dimensions();
        if orig_w.max(orig_h) > max_dim {
            log::debug!("downscaling {}x{} to fit {}", orig_w, orig_h, max_dim);
            img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
                .to_rgb8()
        } else {
            img.to_rgb8()
        }
    } else {
        img.to_rgb8()
    };
    Ok(rgb_image_to_buffer(rgb)?)
}

/// Wrap an `image::RgbImage` without copying
pub fn rgb_image_to_buffer(img: RgbImage) -> Result<PixelBuffer, FilterError> {
    let (width, height) = img.dimensions();
    PixelBuffer::from_rgb(width as usize, height as usize, img.into_raw())
}

/// Copy a buffer into an `image::RgbImage`, dropping row padding
pub fn buffer_to_rgb_image(buffer: &PixelBuffer) -> Result<RgbImage, ToolError> {
    let too_large = || ToolError::TooLarge {
        width: buffer.width(),
        height: buffer.height(),
    };
    let width = u32::try_from(buffer.width()).map_err(|_| too_large())?;
    let height = u32::try_from(buffer.height()).map_err(|_| too_large())?;
    RgbImage::from_raw(width, height, buffer.to_packed()).ok_or_else(too_large)
}

/// Encode a buffer to `path`; the format follows the file extension
pub fn save_rgb<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<(), ToolError> {
    buffer_to_rgb_image(buffer)?.save(path)?;
    Ok(())
}

/// Summary statistics for luma values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaStats {
    /// Minimum luma value.
    pub min: u8,
    /// Maximum luma value.
    pub max: u8,
    /// Average luma value.
    pub avg: u8,
}

/// Summary statistics for a binarized buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Total pixels in the buffer.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute min/max/avg luma over every pixel.
pub fn luma_stats(buffer: &PixelBuffer) -> LumaStats {
    let plane = luma_plane(buffer);
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in &plane {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if plane.is_empty() {
        0
    } else {
        (sum / plane.len() as u64) as u8
    };
    LumaStats { min, max, avg }
}

/// Count black pixels (R == 0) in a binarized buffer.
pub fn binary_stats(buffer: &PixelBuffer) -> BinaryStats {
    let black = buffer
        .rows()
        .flat_map(|row| row.chunks_exact(3))
        .filter(|px| px[0] == 0)
        .count();
    let total = buffer.pixel_count();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: ratio,
    }
}
