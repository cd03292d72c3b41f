//! Histogram equalization
//!
//! Each channel is equalized on its own: intensity `v` becomes
//! `floor(C[v] * 255 / N)` where `C` is the channel's cumulative histogram and
//! `N` the pixel count.

use crate::grid::{RgbGrid, CHANNELS, MAX_SAMPLE};

/// Number of histogram bins.
const BINS: usize = 256;

/// Equalize every channel of `grid` independently.
///
/// Samples outside `[0, 255]` are counted in the nearest end bin.
pub fn apply_histogram_equalization(grid: &RgbGrid) -> RgbGrid {
    if grid.is_empty() {
        return grid.clone();
    }

    let total = grid.pixels().len() as u64;
    let mut lookup = [[0i32; BINS]; CHANNELS];
    for channel in 0..CHANNELS {
        let cumulative = cumulative_histogram(grid, channel);
        for (bin, &count) in cumulative.iter().enumerate() {
            // Exact floor of count * (255 / total); f64 would round some C = N down to 254
            lookup[channel][bin] = (count * MAX_SAMPLE as u64 / total) as i32;
        }
    }

    let mut output = grid.clone();
    for pixel in output.pixels_mut() {
        for channel in 0..CHANNELS {
            pixel[channel] = lookup[channel][bin_of(pixel[channel])];
        }
    }
    output
}

/// Running total of the channel's 256-bin histogram.
fn cumulative_histogram(grid: &RgbGrid, channel: usize) -> [u64; BINS] {
    let mut counts = [0u64; BINS];
    for pixel in grid.pixels() {
        counts[bin_of(pixel[channel])] += 1;
    }

    let mut running = 0;
    for count in counts.iter_mut() {
        running += *count;
        *count = running;
    }
    counts
}

fn bin_of(sample: i32) -> usize {
    sample.clamp(0, MAX_SAMPLE) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_intensity_maps_to_white() {
        let out = apply_histogram_equalization(&RgbGrid::filled(7, 3, [40, 40, 40]));
        assert!(out.pixels().iter().all(|p| *p == [255; 3]));
    }

    #[test]
    fn test_single_intensity_is_exact_for_any_count() {
        // count * 255 / total is exact: C = N gives 255 for every N. Evaluating
        // C * (255.0 / N) in f64 instead gives 254 for N = 25, 29, 50 or 100.
        for (width, height) in [(5, 5), (29, 1), (10, 5), (10, 10)] {
            let out = apply_histogram_equalization(&RgbGrid::filled(width, height, [90, 0, 255]));
            assert!(out.pixels().iter().all(|p| *p == [255; 3]), "{}x{}", width, height);
        }
    }

    #[test]
    fn test_two_levels_split_evenly() {
        let grid = RgbGrid::from_rows(vec![vec![[10; 3], [10; 3], [200; 3], [200; 3]]]).unwrap();
        let out = apply_histogram_equalization(&grid);
        // C[10] = 2 -> 2 * 255 / 4 = 127; C[200] = 4 -> 255
        assert_eq!(out.get(0, 0), [127; 3]);
        assert_eq!(out.get(0, 3), [255; 3]);
    }

    #[test]
    fn test_channels_are_independent() {
        let grid = RgbGrid::from_rows(vec![vec![[0, 100, 5], [255, 100, 5], [255, 100, 6]]]).unwrap();
        let out = apply_histogram_equalization(&grid);
        // Red: C[0] = 1, C[255] = 3; green constant; blue C[5] = 2, C[6] = 3
        assert_eq!(out.get(0, 0), [85, 255, 170]);
        assert_eq!(out.get(0, 1), [255, 255, 170]);
        assert_eq!(out.get(0, 2), [255, 255, 255]);
    }

    #[test]
    fn test_cumulative_histogram_is_monotonic() {
        let grid = RgbGrid::from_fn(5, 5, |r, c| [(r * 50 + c) as i32, 0, 0]);
        let cumulative = cumulative_histogram(&grid, 0);
        assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(cumulative[255], 25);
    }

    #[test]
    fn test_empty_grid() {
        assert!(apply_histogram_equalization(&RgbGrid::new(0, 3)).is_empty());
    }
}
