use crate::error::{FilterError, Result};

/// Bytes per pixel; channel order is R, G, B
pub const CHANNELS: usize = 3;

/// Packed 8-bit RGB raster with an explicit row stride
///
/// Rows may carry padding after `width * 3` bytes. The geometry is checked
/// when the buffer is built, so every `(x, y)` inside `width x height`
/// addresses valid storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    stride: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGB bytes with an explicit stride
    ///
    /// Fails with `EmptyInput` for zero dimensions and `BufferBounds` when
    /// the stride is shorter than a row or the storage is too small.
    pub fn new(width: usize, height: usize, stride: usize, pixels: Vec<u8>) -> Result<Self> {
        check_geometry(width, height, stride, pixels.len())?;
        Ok(Self {
            width,
            height,
            stride,
            pixels,
        })
    }

    /// Wrap tightly packed RGB bytes (stride = width * 3)
    pub fn from_rgb(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        Self::new(width, height, width.saturating_mul(CHANNELS), pixels)
    }

    /// Create a packed buffer where every pixel has the same color
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self> {
        let pixel_count = width
            .checked_mul(height)
            .ok_or(FilterError::BufferBounds {
                width,
                height,
                stride: width.saturating_mul(CHANNELS),
                required: usize::MAX,
                actual: 0,
            })?;
        let mut pixels = Vec::with_capacity(pixel_count.saturating_mul(CHANNELS));
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&rgb);
        }
        Self::from_rgb(width, height, pixels)
    }

    /// Zeroed buffer with the same width, height and stride
    pub(crate) fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            stride: self.stride,
            pixels: vec![0; self.stride * self.height],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row length in bytes, padding included
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of pixels (width * height)
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Byte offset of the first channel of pixel `(x, y)`
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * CHANNELS
    }

    /// RGB triplet at `(x, y)`, or `None` outside the raster
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.offset(x, y);
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Overwrite pixel `(x, y)`; coordinates outside the raster are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.offset(x, y);
        self.pixels[idx..idx + CHANNELS].copy_from_slice(&rgb);
    }

    /// The `width * 3` pixel bytes of row `y`, padding excluded
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.pixels[start..start + self.width * CHANNELS]
    }

    /// Iterate rows top to bottom, padding excluded
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Re-check the geometry against the storage length
    pub fn check_bounds(&self) -> Result<()> {
        check_geometry(self.width, self.height, self.stride, self.pixels.len())
    }

    /// Raw storage, padding included
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable raw storage, used by the filters to fill fresh outputs
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer and return its storage
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Copy the pixels into a tightly packed vector (stride = width * 3)
    pub fn to_packed(&self) -> Vec<u8> {
        if self.stride == self.width * CHANNELS {
            return self.pixels[..self.stride * self.height].to_vec();
        }
        let mut packed = Vec::with_capacity(self.pixel_count() * CHANNELS);
        for row in self.rows() {
            packed.extend_from_slice(row);
        }
        packed
    }
}

fn check_geometry(width: usize, height: usize, stride: usize, actual: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyInput);
    }
    let bounds_error = |required| FilterError::BufferBounds {
        width,
        height,
        stride,
        required,
        actual,
    };
    let row_bytes = width
        .checked_mul(CHANNELS)
        .ok_or_else(|| bounds_error(usize::MAX))?;
    if stride < row_bytes {
        return Err(bounds_error(row_bytes));
    }
    // The last row may omit its padding
    let required = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or_else(|| bounds_error(usize::MAX))?;
    if actual < required {
        return Err(bounds_error(required));
    }
    Ok(())
}
