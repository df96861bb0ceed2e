use pixel_filter::PixelBuffer;

/// Generates a high-contrast gray checkerboard buffer.
pub fn checkerboard(width: usize, height: usize, cell: usize, dark: u8, light: u8) -> PixelBuffer {
    assert!(cell > 0, "cell size must be positive");

    let mut data = vec![0u8; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            let val = if (x / cell + y / cell) & 1 == 0 { dark } else { light };
            let idx = (y * width + x) * 3;
            data[idx..idx + 3].copy_from_slice(&[val, val, val]);
        }
    }
    PixelBuffer::from_rgb(width, height, data).expect("checkerboard geometry is valid")
}

/// Generates a colorful pseudo-random buffer with `padding` extra bytes per row.
pub fn noise(width: usize, height: usize, padding: usize, seed: u32) -> PixelBuffer {
    let stride = width * 3 + padding;
    let mut state = seed.max(1);
    let mut data = vec![0u8; stride * height];
    for y in 0..height {
        for x in 0..width * 3 {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            data[y * stride + x] = (state >> 24) as u8;
        }
    }
    PixelBuffer::new(width, height, stride, data).expect("noise geometry is valid")
}
