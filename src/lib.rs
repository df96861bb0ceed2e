//! pixel_filter - pixel-level image filters for packed RGB buffers
//!
//! BT.601 grayscale, binarization against a fixed level or Otsu's adaptive
//! threshold, and a 5x5 sharpen with toroidal borders. Every operation is a
//! pure function: it reads a [`PixelBuffer`] and returns a fresh one.
//! Decoding and encoding image files is left to the caller (see [`tools`]).

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment-driven tuning and per-call options
pub mod config;
/// Error taxonomy
pub mod error;
/// Core data structures (PixelBuffer, Histogram, Kernel, Threshold)
pub mod models;
/// Image-file bridge for the CLI and tests
pub mod tools;
/// Filter implementations (grayscale, binarization, sharpen)
pub mod utils;

pub use config::{FilterOptions, Parallelism};
pub use error::{FilterError, Result};
pub use models::{Histogram, Kernel, PixelBuffer, Threshold};
pub use utils::binarization::{adaptive_binarize, binarize, otsu_threshold, select_threshold};
pub use utils::grayscale::grayscale;
pub use utils::sharpen::{convolve, sharpen};

/// The filters with explicit scheduling options
pub mod with_options {
    pub use crate::utils::binarization::{
        adaptive_binarize_with, binarize_with, otsu_threshold_with,
    };
    pub use crate::utils::grayscale::grayscale_with;
    pub use crate::utils::sharpen::{convolve_with, sharpen_with};
}
