//! Spatial convolution
//!
//! Neighborhood terms that fall outside the grid are skipped. There is no
//! padding and no renormalization, so border pixels of a blur come out darker
//! than interior ones.

use super::round_half_up;
use crate::grid::{RgbGrid, CHANNELS};
use crate::kernel::Kernel;

/// Convolve every channel of `grid` with `kernel`.
///
/// The output has the same dimensions as the input. Each sum is accumulated
/// in `f64`, rounded half-up, and stored without clamping.
pub fn convolve(grid: &RgbGrid, kernel: &Kernel) -> RgbGrid {
    RgbGrid::from_fn(grid.width(), grid.height(), |row, col| {
        let mut pixel = [0; CHANNELS];
        for channel in 0..CHANNELS {
            pixel[channel] = round_half_up(weighted_sum(grid, kernel, row, col, channel));
        }
        pixel
    })
}

/// Blur with the 3x3 blur kernel.
pub fn apply_blur(grid: &RgbGrid) -> RgbGrid {
    convolve(grid, &Kernel::blur())
}

/// Sharpen with the 5x5 sharpen kernel.
pub fn apply_sharpen(grid: &RgbGrid) -> RgbGrid {
    convolve(grid, &Kernel::sharpen())
}

/// Unrounded kernel response at one position and channel.
pub(crate) fn weighted_sum(
    grid: &RgbGrid,
    kernel: &Kernel,
    row: usize,
    col: usize,
    channel: usize,
) -> f64 {
    let center = kernel.center() as isize;
    let mut sum = 0.0;

    for kernel_row in 0..kernel.size() {
        for kernel_col in 0..kernel.size() {
            let src_row = row as isize + kernel_row as isize - center;
            let src_col = col as isize + kernel_col as isize - center;
            if !grid.contains(src_row, src_col) {
                continue;
            }
            let sample = grid.get(src_row as usize, src_col as usize)[channel];
            sum += sample as f64 * kernel.weight(kernel_row, kernel_col);
        }
    }

    sum
}
