//! Runtime tuning for the filters
//!
//! Environment variables are read once per process:
//! - `PIXF_PARALLEL_MIN_PIXELS`: pixel count at which `Parallelism::Auto`
//!   switches to row-parallel processing (default 65536, `0` = always)

use std::sync::OnceLock;

const DEFAULT_PARALLEL_MIN_PIXELS: usize = 256 * 256;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static PARALLEL_MIN_PIXELS: OnceLock<usize> = OnceLock::new();

/// Pixel count at which automatic parallelism kicks in
pub fn parallel_min_pixels() -> usize {
    *PARALLEL_MIN_PIXELS
        .get_or_init(|| parse_env_usize("PIXF_PARALLEL_MIN_PIXELS", DEFAULT_PARALLEL_MIN_PIXELS))
}

/// How per-row work is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// Parallel once the buffer reaches `parallel_min_pixels()`
    #[default]
    Auto,
    /// Always on the calling thread
    Serial,
    /// Always on the rayon pool
    Parallel,
}

impl Parallelism {
    /// Resolve the policy for a buffer of `pixel_count` pixels
    pub fn use_parallel(self, pixel_count: usize) -> bool {
        match self {
            Parallelism::Auto => pixel_count >= parallel_min_pixels(),
            Parallelism::Serial => false,
            Parallelism::Parallel => true,
        }
    }
}

/// Options accepted by the `*_with` variants of each filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    /// Scheduling policy for row work
    pub parallelism: Parallelism,
}

impl FilterOptions {
    /// Force single-threaded processing
    pub fn serial() -> Self {
        Self {
            parallelism: Parallelism::Serial,
        }
    }

    /// Force rayon processing regardless of size
    pub fn parallel() -> Self {
        Self {
            parallelism: Parallelism::Parallel,
        }
    }
}
