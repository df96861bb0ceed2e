/// Packed RGB raster with stride
pub mod buffer;
/// 256-bin intensity histogram
pub mod histogram;
/// Convolution kernels
pub mod kernel;
/// Binarization cut points
pub mod threshold;

pub use buffer::{CHANNELS, PixelBuffer};
pub use histogram::{Histogram, LEVELS};
pub use kernel::Kernel;
pub use threshold::Threshold;
