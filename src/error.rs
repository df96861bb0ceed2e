//! Error taxonomy shared by every filter operation.
//!
//! All variants are raised by precondition checks before any output buffer
//! is allocated, so a failed call never leaves partial results behind.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors produced by the pixel filters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A strength or threshold lies outside its documented domain
    #[error("{parameter} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Value that was supplied
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Declared geometry does not fit the backing storage
    #[error(
        "buffer geometry {width}x{height} (stride {stride}) needs {required} bytes, storage has {actual}"
    )]
    BufferBounds {
        /// Declared width in pixels
        width: usize,
        /// Declared height in pixels
        height: usize,
        /// Declared row length in bytes
        stride: usize,
        /// Bytes the geometry requires
        required: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// A zero-pixel input where at least one pixel is required
    #[error("input contains no pixels")]
    EmptyInput,

    /// A convolution kernel with an even size or a mismatched weight count
    #[error("kernel of size {size} must be odd and carry {expected} weights, got {actual}")]
    InvalidKernel {
        /// Side length of the kernel
        size: usize,
        /// Number of weights expected (size * size)
        expected: usize,
        /// Number of weights supplied
        actual: usize,
    },
}

impl FilterError {
    /// Build an `OutOfRange` error for a fractional strength in [0, 1]
    pub(crate) fn strength(parameter: &'static str, value: f64) -> Self {
        FilterError::OutOfRange {
            parameter,
            value,
            min: 0.0,
            max: 1.0,
        }
    }
}

/// Validate that a fractional strength is finite and within [0, 1]
pub(crate) fn check_strength(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(FilterError::strength(parameter, value))
    }
}
