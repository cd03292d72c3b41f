//! Pixel grids
//!
//! [`RgbGrid`] is the working grid every engine reads and produces. Samples are
//! `i32` so that intermediate results (a sharpened pixel at 300, a diffused
//! error at -40) survive until they are committed to an [`Rgb24Image`], the
//! only place the `[0, 255]` range is enforced.

use std::fmt;
use std::ops::{Index, IndexMut};

use image::{Rgb, RgbImage};

use crate::error::FilterError;

/// One pixel: `[R, G, B]`.
pub type Pixel = [i32; 3];

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// Largest value a committed sample may hold.
pub const MAX_SAMPLE: i32 = 255;

/// A rectangular grid of RGB samples indexed `[row][col][channel]`.
///
/// Stored row-major in a single buffer. `height` is the number of rows and
/// `width` the number of columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RgbGrid {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl RgbGrid {
    /// Create a grid of black pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, [0; CHANNELS])
    }

    /// Create a grid where every pixel has the same value.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self { width, height, pixels: vec![pixel; width * height] }
    }

    /// Create a grid by evaluating `f(row, col)` for every position.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self { width, height, pixels }
    }

    /// Build a grid from nested `[row][col]` pixels.
    ///
    /// Every row must have the same length as the first one.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, FilterError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut pixels = Vec::with_capacity(width * height);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(FilterError::RaggedGrid { row, expected: width, actual: values.len() });
            }
            pixels.extend(values);
        }

        Ok(Self { width, height, pixels })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if the grid has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns true if `(row, col)` lies inside the grid.
    ///
    /// Takes signed coordinates so neighborhood offsets can be checked before
    /// they are converted back to indices.
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Pixel {
        self[(row, col)]
    }

    /// Overwrite the pixel at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, pixel: Pixel) {
        self[(row, col)] = pixel;
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Mutable access to all pixels in row-major order.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// One row of pixels.
    pub fn row(&self, row: usize) -> &[Pixel] {
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Copy the grid out as nested `[row][col]` pixels.
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        (0..self.height).map(|row| self.row(row).to_vec()).collect()
    }

    /// Apply `f` to every sample of every channel, producing a new grid.
    pub fn map_samples(&self, mut f: impl FnMut(i32) -> i32) -> Self {
        let pixels = self.pixels.iter().map(|p| [f(p[0]), f(p[1]), f(p[2])]).collect();
        Self { width: self.width, height: self.height, pixels }
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({}, {}) outside {}x{} grid",
            row,
            col,
            self.width,
            self.height
        );
        row * self.width + col
    }
}

impl Index<(usize, usize)> for RgbGrid {
    type Output = Pixel;

    fn index(&self, (row, col): (usize, usize)) -> &Pixel {
        &self.pixels[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for RgbGrid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Pixel {
        let offset = self.offset(row, col);
        &mut self.pixels[offset]
    }
}

/// Restrict a sample to `[0, 255]`.
pub fn clamp_sample(value: i32) -> i32 {
    value.clamp(0, MAX_SAMPLE)
}

/// A 24-bit RGB image: a grid whose samples are always within `[0, 255]`.
///
/// Every grid that enters the container is clamped, whether through
/// [`Rgb24Image::new`] or [`Rgb24Image::replace`]. Callers only ever get a
/// shared borrow or an owned copy back, so the stored samples cannot be pushed
/// out of range from outside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rgb24Image {
    grid: RgbGrid,
}

impl Rgb24Image {
    /// Take ownership of `grid`, clamping every sample.
    pub fn new(grid: RgbGrid) -> Self {
        Self { grid: grid.map_samples(clamp_sample) }
    }

    /// Replace the stored grid, clamping every sample.
    pub fn replace(&mut self, grid: RgbGrid) {
        self.grid = grid.map_samples(clamp_sample);
    }

    /// Read-only view of the stored grid.
    pub fn view(&self) -> &RgbGrid {
        &self.grid
    }

    /// Independent copy of the stored grid.
    pub fn to_grid(&self) -> RgbGrid {
        self.grid.clone()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Build from a decoded `image` buffer.
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let grid = RgbGrid::from_fn(width as usize, height as usize, |row, col| {
            let Rgb([r, g, b]) = *image.get_pixel(col as u32, row as u32);
            [r as i32, g as i32, b as i32]
        });
        Self { grid }
    }

    /// Convert to an `image` buffer for encoding or display.
    pub fn to_rgb_image(&self) -> RgbImage {
        let grid = &self.grid;
        RgbImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
            let [r, g, b] = grid.get(y as usize, x as usize);
            // Samples are clamped on entry, so these casts never truncate.
            Rgb([r as u8, g as u8, b as u8])
        })
    }
}

impl From<RgbGrid> for Rgb24Image {
    fn from(grid: RgbGrid) -> Self {
        Self::new(grid)
    }
}

impl fmt::Display for Rgb24Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.height() {
            for pixel in self.grid.row(row) {
                write!(f, "R: {:03} G: {:03} B: {:03} ", pixel[0], pixel[1], pixel[2])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
