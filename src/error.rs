//! Error types for filter engines

use thiserror::Error;

/// Error raised by an engine when one of its documented arguments is invalid.
///
/// Engines only validate the inputs they name (seed count, crop bounds, kernel
/// shape). Grid shape is checked once, when an [`RgbGrid`](crate::grid::RgbGrid)
/// is built from nested rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Mosaic needs at least one seed
    #[error("Number of mosaic seeds must be positive, got {0}")]
    InvalidSeedCount(i64),
    /// Crop range falls outside the source grid or is reversed
    #[error("Crop range x {start_x}..{end_x}, y {start_y}..{end_y} is out of bounds for a {width}x{height} image")]
    CropOutOfBounds {
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
        width: usize,
        height: usize,
    },
    /// Kernel is not a non-empty odd square
    #[error("Kernel must be an odd-sized square, got {len} weights for side {size}")]
    InvalidKernel { size: usize, len: usize },
    /// Rows of a nested grid have different lengths
    #[error("Row {row} has {actual} columns, expected {expected}")]
    RaggedGrid { row: usize, expected: usize, actual: usize },
}
