//! pixelfilter - Pixel-array transformations for RGB images
//!
//! This library provides:
//! - A clamped 24-bit RGB container over an unclamped working grid
//! - Filter engines: blur, sharpen, greyscale, sepia, Floyd–Steinberg
//!   dithering, mosaic, Sobel edge detection, histogram equalization, crop
//! - An image model and a batch-command interpreter driving the engines

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod grid;
pub mod io;
pub mod kernel;
pub mod model;
pub mod rng;
pub mod script;

pub use error::FilterError;
pub use grid::{Pixel, Rgb24Image, RgbGrid};
pub use model::{ImageModel, ModelError};
