//! Filter engines over [`RgbGrid`](crate::grid::RgbGrid)
//!
//! Every engine borrows its input and returns a new grid. Results are not
//! clamped; commit them to an [`Rgb24Image`](crate::grid::Rgb24Image) to bring
//! samples back into `[0, 255]`.
//!
//! # Module Structure
//!
//! - [`convolve`] - Kernel convolution (blur, sharpen)
//! - [`color`] - 3x3 color matrix transforms (greyscale, sepia)
//! - [`dither`] - Floyd–Steinberg error diffusion
//! - [`mosaic`] - Nearest-seed partition with cell averaging
//! - [`edge`] - Sobel gradient magnitude with global rescale
//! - [`histogram`] - Per-channel histogram equalization
//! - [`crop`] - Half-open sub-grid extraction
//! - [`types`] - Filter selection and string parsing

pub mod color;
pub mod convolve;
pub mod crop;
pub mod dither;
pub mod edge;
pub mod histogram;
pub mod mosaic;
pub mod types;

// Re-export main operations at the module level for convenience
pub use color::{apply_greyscale, apply_sepia, transform};
pub use convolve::{apply_blur, apply_sharpen, convolve};
pub use crop::crop;
pub use dither::apply_dither;
pub use edge::{apply_edge_detection, detect_edges_with_range, MagnitudeRange};
pub use histogram::apply_histogram_equalization;
pub use mosaic::apply_mosaic;
pub use types::{parse_filter_str, Filter, FilterParseError};

use crate::error::FilterError;

/// Result type alias for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Round to the nearest integer, halves toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
