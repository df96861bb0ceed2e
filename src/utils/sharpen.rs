//! Convolution with toroidal borders
//!
//! Window coordinates that leave the raster wrap around to the opposite
//! edge, `wrap(v, n) = ((v mod n) + n) mod n`, so every tap reads a real
//! pixel without edge special cases. The whole source is read before any
//! output is written; results always land in a fresh buffer.

use crate::config::FilterOptions;
use crate::error::Result;
use crate::models::{CHANNELS, Kernel, PixelBuffer};
use crate::utils::parallel::fill_rows;

/// Map a possibly negative or overflowing coordinate back into `0..n`
#[inline]
pub fn wrap(v: isize, n: usize) -> usize {
    v.rem_euclid(n as isize) as usize
}

/// Sharpen `buffer` with the 5x5 unsharp kernel
///
/// # Arguments
/// * `buffer` - Source RGB pixels, never modified
/// * `strength` - Blend in [0, 1]; `0` returns a copy of the input
///
/// # Returns
/// A fresh buffer of the same geometry, or `OutOfRange` before any work
/// when `strength` is outside [0, 1]
pub fn sharpen(buffer: &PixelBuffer, strength: f64) -> Result<PixelBuffer> {
    sharpen_with(buffer, strength, FilterOptions::default())
}

/// `sharpen` with explicit scheduling
pub fn sharpen_with(
    buffer: &PixelBuffer,
    strength: f64,
    options: FilterOptions,
) -> Result<PixelBuffer> {
    let kernel = Kernel::sharpen(strength)?;
    log::debug!(
        "sharpen {}x{} at strength {:.3}",
        buffer.width(),
        buffer.height(),
        strength
    );
    convolve_with(buffer, &kernel, options)
}

/// Apply any odd-sized kernel with toroidal addressing
pub fn convolve(buffer: &PixelBuffer, kernel: &Kernel) -> Result<PixelBuffer> {
    convolve_with(buffer, kernel, FilterOptions::default())
}

/// `convolve` with explicit scheduling
pub fn convolve_with(
    buffer: &PixelBuffer,
    kernel: &Kernel,
    options: FilterOptions,
) -> Result<PixelBuffer> {
    buffer.check_bounds()?;

    let width = buffer.width();
    let height = buffer.height();
    let size = kernel.size();
    let radius = kernel.radius() as isize;

    // Source column byte offset for every (x + fx) in the padded row
    let col_offsets: Vec<usize> = (0..width + size - 1)
        .map(|ex| wrap(ex as isize - radius, width) * CHANNELS)
        .collect();

    let src = buffer.as_bytes();
    let stride = buffer.stride();
    let scale = kernel.scale();
    let bias = kernel.bias();

    let parallel = options.parallelism.use_parallel(buffer.pixel_count());
    let mut out = buffer.blank_like();
    fill_rows(&mut out, parallel, |y, row| {
        let row_starts: Vec<usize> = (0..size)
            .map(|fy| wrap(y as isize + fy as isize - radius, height) * stride)
            .collect();
        let center_row = y * stride;

        for x in 0..width {
            let mut acc = [0.0f64; CHANNELS];
            for (fy, &row_start) in row_starts.iter().enumerate() {
                for fx in 0..size {
                    let weight = kernel.weight(fx, fy);
                    if weight == 0.0 {
                        continue;
                    }
                    let idx = row_start + col_offsets[x + fx];
                    for c in 0..CHANNELS {
                        acc[c] += src[idx + c] as f64 * weight;
                    }
                }
            }

            let center = center_row + x * CHANNELS;
            let dst = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
            for c in 0..CHANNELS {
                let value = scale * acc[c] + bias * src[center + c] as f64;
                dst[c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    });
    Ok(out)
}
