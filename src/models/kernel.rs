use crate::error::{FilterError, Result, check_strength};

/// Side length of the sharpen kernel
pub const SHARPEN_SIZE: usize = 5;

/// Unsharp-style 5x5 weights: center 16, inner ring 2, outer ring -1,
/// corners 0
pub const SHARPEN_WEIGHTS: [[f64; SHARPEN_SIZE]; SHARPEN_SIZE] = [
    [0.0, -1.0, -1.0, -1.0, 0.0],
    [-1.0, 2.0, 2.0, 2.0, -1.0],
    [-1.0, 2.0, 16.0, 2.0, -1.0],
    [-1.0, 2.0, 2.0, 2.0, -1.0],
    [0.0, -1.0, -1.0, -1.0, 0.0],
];

/// Square convolution kernel
///
/// Each output channel is `scale * sum(weights * window) + bias * center`,
/// where `center` is the untouched source sample under the kernel's middle.
/// For [`Kernel::sharpen`], `scale` is normalized by the weight sum (20), so
/// it equals `strength / 20` rather than `strength / 16`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
    bias: f64,
    scale: f64,
}

impl Kernel {
    /// Build a kernel from row-major weights
    ///
    /// `size` must be odd and `weights.len()` must equal `size * size`. A
    /// size whose square overflows `usize` is rejected with `expected`
    /// reported as `usize::MAX`.
    pub fn new(size: usize, weights: Vec<f64>, bias: f64, scale: f64) -> Result<Self> {
        let expected = size.checked_mul(size).ok_or(FilterError::InvalidKernel {
            size,
            expected: usize::MAX,
            actual: weights.len(),
        })?;
        if size % 2 == 0 || weights.len() != expected {
            return Err(FilterError::InvalidKernel {
                size,
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self {
            size,
            weights,
            bias,
            scale,
        })
    }

    /// The sharpen kernel for `strength` in [0, 1]
    ///
    /// `bias = 1 - strength` and `scale = strength / sum(weights)`, so a flat
    /// region keeps its value at every strength and `strength = 0` is the
    /// identity.
    pub fn sharpen(strength: f64) -> Result<Self> {
        let strength = check_strength("strength", strength)?;
        let weights: Vec<f64> = SHARPEN_WEIGHTS.iter().flatten().copied().collect();
        let sum: f64 = weights.iter().sum();
        Self::new(SHARPEN_SIZE, weights, 1.0 - strength, strength / sum)
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to an edge
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at column `fx`, row `fy`
    pub fn weight(&self, fx: usize, fy: usize) -> f64 {
        self.weights[fy * self.size + fx]
    }

    /// Row-major weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weight given to the untouched center sample
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Multiplier applied to the weighted window sum
    pub fn scale(&self) -> f64 {
        self.scale
    }
}
