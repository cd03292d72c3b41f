//! Floyd–Steinberg error diffusion
//!
//! Reduces an image to black and white. The input is converted to greyscale
//! first, then scanned top to bottom, left to right over one working buffer;
//! each pixel is quantized using whatever error earlier pixels pushed into it.
//! The scan order is a data dependency and must not change.

use super::color::apply_greyscale;
use crate::grid::{RgbGrid, CHANNELS, MAX_SAMPLE};

/// Diffusion weights (numerators over 16) as `(row offset, col offset, weight)`.
const DIFFUSION: [(isize, isize, i32); 4] = [(0, 1, 7), (1, 0, 5), (1, -1, 3), (1, 1, 1)];

/// Dither `grid` to pure black and white.
///
/// Error shares use truncating integer division and land only on neighbors
/// inside the grid. Nothing is clamped during the scan.
pub fn apply_dither(grid: &RgbGrid) -> RgbGrid {
    let mut work = apply_greyscale(grid);

    for row in 0..work.height() {
        for col in 0..work.width() {
            let old = work.get(row, col)[0];
            let new = quantize(old);
            let error = old - new;

            work.set(row, col, [new; CHANNELS]);

            for (d_row, d_col, weight) in DIFFUSION {
                let target_row = row as isize + d_row;
                let target_col = col as isize + d_col;
                if !work.contains(target_row, target_col) {
                    continue;
                }
                let share = weight * error / 16;
                let target = &mut work[(target_row as usize, target_col as usize)];
                for sample in target.iter_mut() {
                    *sample += share;
                }
            }
        }
    }

    work
}

/// Nearest of 0 and 255; exact ties go to 0.
fn quantize(value: i32) -> i32 {
    if (value - MAX_SAMPLE).abs() < value.abs() {
        MAX_SAMPLE
    } else {
        0
    }
}
