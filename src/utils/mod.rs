//! Pixel-processing routines
//!
//! - Grayscale conversion (RGB to BT.601 luma)
//! - Binarization (fixed level/strength and Otsu's method)
//! - Sharpening (5x5 convolution with toroidal borders)

pub mod binarization;
pub mod grayscale;
pub(crate) mod parallel;
pub mod sharpen;
