//! Per-pixel color transforms

use super::round_half_up;
use crate::grid::RgbGrid;
use crate::kernel::ColorMatrix;

/// Multiply every pixel's `(R, G, B)` vector by `matrix`.
///
/// Components are rounded half-up and stored without clamping.
pub fn transform(grid: &RgbGrid, matrix: &ColorMatrix) -> RgbGrid {
    RgbGrid::from_fn(grid.width(), grid.height(), |row, col| {
        let [r, g, b] = grid.get(row, col);
        let out = matrix.apply([r as f64, g as f64, b as f64]);
        [round_half_up(out[0]), round_half_up(out[1]), round_half_up(out[2])]
    })
}

/// Luminance greyscale. All three channels of each output pixel are equal.
pub fn apply_greyscale(grid: &RgbGrid) -> RgbGrid {
    transform(grid, &ColorMatrix::GREYSCALE)
}

/// Sepia tone.
pub fn apply_sepia(grid: &RgbGrid) -> RgbGrid {
    transform(grid, &ColorMatrix::SEPIA)
}
