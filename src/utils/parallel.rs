//! Row scheduling shared by the per-pixel filters

use crate::models::{CHANNELS, PixelBuffer};
use rayon::prelude::*;

/// Fill every row of `out` with `f(y, row)`
///
/// `row` is the `width * 3` pixel bytes of row `y`; stride padding is left
/// zeroed. Rows are handed to the rayon pool when `parallel` is set.
pub(crate) fn fill_rows<F>(out: &mut PixelBuffer, parallel: bool, f: F)
where
    F: Fn(usize, &mut [u8]) + Sync + Send,
{
    let stride = out.stride();
    let row_bytes = out.width() * CHANNELS;
    let bytes = out.as_bytes_mut();

    if parallel {
        bytes
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y, &mut row[..row_bytes]));
    } else {
        bytes
            .chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y, &mut row[..row_bytes]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rows_skips_padding() {
        let src = PixelBuffer::new(2, 3, 8, vec![0xFF; 24]).unwrap();
        for parallel in [false, true] {
            let mut out = src.blank_like();
            fill_rows(&mut out, parallel, |y, row| row.fill(y as u8 + 1));
            assert_eq!(out.pixel(1, 2), Some([3, 3, 3]));
            // Padding bytes stay zero
            assert_eq!(out.as_bytes()[6..8], [0, 0]);
        }
    }
}
