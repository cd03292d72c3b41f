//! Convolution kernels and color matrices
//!
//! The named constants are plain `const` data. Engines borrow them and never
//! mutate them.

use crate::error::FilterError;

/// 3x3 blur kernel (weights sum to 1).
pub const BLUR_3X3: [[f64; 3]; 3] = [
    [0.0625, 0.125, 0.0625],
    [0.125, 0.25, 0.125],
    [0.0625, 0.125, 0.0625],
];

/// 5x5 sharpen kernel.
pub const SHARPEN_5X5: [[f64; 5]; 5] = [
    [-0.125, -0.125, -0.125, -0.125, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, 0.25, 1.0, 0.25, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, -0.125, -0.125, -0.125, -0.125],
];

/// Horizontal Sobel gradient.
pub const SOBEL_X: [[f64; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];

/// Vertical Sobel gradient.
pub const SOBEL_Y: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];

/// An odd-sized square matrix of real weights.
///
/// The center cell sits at `((size - 1) / 2, (size - 1) / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// Fails unless `size` is odd and `weights` holds exactly `size * size`
    /// values.
    pub fn new(size: usize, weights: Vec<f64>) -> Result<Self, FilterError> {
        if size % 2 == 0 || weights.len() != size * size {
            return Err(FilterError::InvalidKernel { size, len: weights.len() });
        }
        Ok(Self { size, weights })
    }

    /// Build a kernel from a fixed-size square array.
    ///
    /// # Panics
    ///
    /// Panics if `N` is even.
    pub fn from_array<const N: usize>(rows: &[[f64; N]; N]) -> Self {
        assert!(N % 2 == 1, "kernel side must be odd, got {}", N);
        Self { size: N, weights: rows.iter().flatten().copied().collect() }
    }

    /// The 3x3 blur kernel.
    pub fn blur() -> Self {
        Self::from_array(&BLUR_3X3)
    }

    /// The 5x5 sharpen kernel.
    pub fn sharpen() -> Self {
        Self::from_array(&SHARPEN_5X5)
    }

    /// The horizontal Sobel kernel.
    pub fn sobel_x() -> Self {
        Self::from_array(&SOBEL_X)
    }

    /// The vertical Sobel kernel.
    pub fn sobel_y() -> Self {
        Self::from_array(&SOBEL_Y)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the center row and column.
    pub fn center(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Weight at `(row, col)`.
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }
}

/// A 3x3 matrix applied to each `(R, G, B)` vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Luminance greyscale: every output channel gets the same weighted sum.
    pub const GREYSCALE: ColorMatrix = ColorMatrix([
        [0.2126, 0.7152, 0.0722],
        [0.2126, 0.7152, 0.0722],
        [0.2126, 0.7152, 0.0722],
    ]);

    /// Standard sepia tone.
    pub const SEPIA: ColorMatrix = ColorMatrix([
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ]);

    /// `self · [r, g, b]` before rounding.
    pub fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        let m = &self.0;
        [
            m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
            m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
            m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
        ]
    }
}
