//! Sub-grid extraction

use crate::error::FilterError;
use crate::grid::RgbGrid;

/// Copy the half-open region `[start_x, end_x) x [start_y, end_y)`.
///
/// `x` indexes columns and `y` rows. The result is exactly
/// `(end_y - start_y)` rows by `(end_x - start_x)` columns.
///
/// # Errors
///
/// Returns [`FilterError::CropOutOfBounds`] if a start exceeds its end or an
/// end exceeds the grid.
pub fn crop(
    grid: &RgbGrid,
    start_x: usize,
    start_y: usize,
    end_x: usize,
    end_y: usize,
) -> Result<RgbGrid, FilterError> {
    if start_x > end_x || start_y > end_y || end_x > grid.width() || end_y > grid.height() {
        return Err(FilterError::CropOutOfBounds {
            start_x,
            start_y,
            end_x,
            end_y,
            width: grid.width(),
            height: grid.height(),
        });
    }

    Ok(RgbGrid::from_fn(end_x - start_x, end_y - start_y, |row, col| {
        grid.get(start_y + row, start_x + col)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> RgbGrid {
        RgbGrid::from_fn(width, height, |r, c| [r as i32, c as i32, (r * width + c) as i32])
    }

    #[test]
    fn test_crop_shape_and_contents() {
        let grid = numbered(6, 5);
        let out = crop(&grid, 1, 2, 4, 5).unwrap();

        assert_eq!(out.width(), 3);
        assert_eq!(out.height(), 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(out.get(i, j), grid.get(2 + i, 1 + j));
            }
        }
    }

    #[test]
    fn test_full_crop_is_identity() {
        let grid = numbered(4, 3);
        assert_eq!(crop(&grid, 0, 0, 4, 3).unwrap(), grid);
    }

    #[test]
    fn test_empty_range_gives_empty_grid() {
        let out = crop(&numbered(4, 3), 2, 1, 2, 3).unwrap();
        assert_eq!(out.width(), 0);
        assert_eq!(out.height(), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_end_past_edge_is_rejected() {
        let err = crop(&numbered(4, 3), 0, 0, 5, 3).unwrap_err();
        assert!(matches!(err, FilterError::CropOutOfBounds { end_x: 5, width: 4, .. }));
        assert!(crop(&numbered(4, 3), 0, 0, 4, 4).is_err());
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        assert!(crop(&numbered(4, 3), 3, 0, 1, 2).is_err());
        assert!(crop(&numbered(4, 3), 0, 2, 1, 1).is_err());
    }
}
