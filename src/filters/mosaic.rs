//! Mosaic: nearest-seed partition with per-cell color averaging

use log::debug;

use crate::error::FilterError;
use crate::grid::{Pixel, RgbGrid, CHANNELS};
use crate::rng::SeedSource;

/// Split `grid` into `seed_count` cells and paint each cell its mean color.
///
/// Seeds are drawn from `rng` (row, then column) and may repeat. Each pixel
/// joins the spatially nearest seed; on an exact distance tie the seed drawn
/// first wins. Channel means use truncating integer division.
///
/// # Errors
///
/// Returns [`FilterError::InvalidSeedCount`] when `seed_count` is zero.
pub fn apply_mosaic<R: SeedSource>(
    grid: &RgbGrid,
    seed_count: usize,
    rng: &mut R,
) -> Result<RgbGrid, FilterError> {
    if seed_count == 0 {
        return Err(FilterError::InvalidSeedCount(0));
    }
    if grid.is_empty() {
        return Ok(grid.clone());
    }

    let seeds = draw_seeds(grid.height(), grid.width(), seed_count, rng);
    let assignment = nearest_seeds(grid, &seeds);

    let mut sums = vec![[0i64; CHANNELS]; seeds.len()];
    let mut counts = vec![0i64; seeds.len()];
    for (pixel, &seed) in grid.pixels().iter().zip(&assignment) {
        for channel in 0..CHANNELS {
            sums[seed][channel] += pixel[channel] as i64;
        }
        counts[seed] += 1;
    }

    let means: Vec<Pixel> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &count)| {
            if count == 0 {
                return [0; CHANNELS];
            }
            [(sum[0] / count) as i32, (sum[1] / count) as i32, (sum[2] / count) as i32]
        })
        .collect();

    let occupied = counts.iter().filter(|&&c| c > 0).count();
    debug!("mosaic: {} seeds, {} non-empty cells", seeds.len(), occupied);

    let mut output = grid.clone();
    for (pixel, &seed) in output.pixels_mut().iter_mut().zip(&assignment) {
        *pixel = means[seed];
    }
    Ok(output)
}

/// Draw `count` seed positions uniformly over `[0, rows) x [0, cols)`.
fn draw_seeds<R: SeedSource>(
    rows: usize,
    cols: usize,
    count: usize,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    (0..count)
        .map(|_| {
            let row = rng.next_index(rows);
            let col = rng.next_index(cols);
            (row, col)
        })
        .collect()
}

/// For every pixel in row-major order, the index of its nearest seed.
///
/// Squared distances are compared exactly in integers, which orders seeds the
/// same way as Euclidean distance.
fn nearest_seeds(grid: &RgbGrid, seeds: &[(usize, usize)]) -> Vec<usize> {
    let mut assignment = Vec::with_capacity(grid.width() * grid.height());

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let mut best = 0;
            let mut best_distance = u64::MAX;
            for (index, &(seed_row, seed_col)) in seeds.iter().enumerate() {
                let distance = squared_distance((row, col), (seed_row, seed_col));
                if distance < best_distance {
                    best = index;
                    best_distance = distance;
                }
            }
            assignment.push(best);
        }
    }

    assignment
}

fn squared_distance(a: (usize, usize), b: (usize, usize)) -> u64 {
    let dr = a.0.abs_diff(b.0) as u64;
    let dc = a.1.abs_diff(b.1) as u64;
    dr * dr + dc * dc
}
