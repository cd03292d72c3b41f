//! Sobel edge detection
//!
//! Gradient magnitudes are computed per channel, rescaled to `[0, 255]` using
//! the global minimum and maximum over every pixel and channel, and finally
//! converted to greyscale.

use log::debug;

use super::color::apply_greyscale;
use super::convolve::weighted_sum;
use super::round_half_up;
use crate::grid::{RgbGrid, CHANNELS, MAX_SAMPLE};
use crate::kernel::Kernel;

/// Bounds of the raw gradient magnitudes before rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagnitudeRange {
    pub min: i32,
    pub max: i32,
}

impl MagnitudeRange {
    /// True when every magnitude is the same value.
    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }

    /// Map `value` into `[0, 255]` with truncating integer division.
    ///
    /// A flat range maps everything to 0.
    pub fn rescale(&self, value: i32) -> i32 {
        if self.is_flat() {
            return 0;
        }
        (value - self.min) * MAX_SAMPLE / (self.max - self.min)
    }
}

/// Highlight edges, returning a greyscale grid.
pub fn apply_edge_detection(grid: &RgbGrid) -> RgbGrid {
    detect_edges_with_range(grid).0
}

/// Highlight edges and also return the raw magnitude range.
///
/// For an empty grid the range is `0..=0`.
pub fn detect_edges_with_range(grid: &RgbGrid) -> (RgbGrid, MagnitudeRange) {
    let sobel_x = Kernel::sobel_x();
    let sobel_y = Kernel::sobel_y();
    let mut range: Option<MagnitudeRange> = None;

    let magnitudes = RgbGrid::from_fn(grid.width(), grid.height(), |row, col| {
        let mut pixel = [0; CHANNELS];
        for channel in 0..CHANNELS {
            let gx = weighted_sum(grid, &sobel_x, row, col, channel);
            let gy = weighted_sum(grid, &sobel_y, row, col, channel);
            let magnitude = round_half_up((gx * gx + gy * gy).sqrt());
            pixel[channel] = magnitude;

            range = Some(match range {
                Some(r) => MagnitudeRange { min: r.min.min(magnitude), max: r.max.max(magnitude) },
                None => MagnitudeRange { min: magnitude, max: magnitude },
            });
        }
        pixel
    });

    let range = range.unwrap_or(MagnitudeRange { min: 0, max: 0 });
    debug!("edge magnitudes: min = {}, max = {}", range.min, range.max);

    let rescaled = magnitudes.map_samples(|value| range.rescale(value));
    (apply_greyscale(&rescaled), range)
}
