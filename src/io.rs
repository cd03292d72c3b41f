//! Image file decode and encode
//!
//! Any format the `image` crate can read is accepted on load; the output
//! format follows the file extension on save.

use std::io;
use std::path::Path;

use image::RgbImage;
use thiserror::Error;

use crate::grid::Rgb24Image;

/// Error type for image file operations
#[derive(Debug, Error)]
pub enum ImageIoError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image decoding or encoding error
    #[error("Image error for '{path}': {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Load an image file as a 24-bit RGB image.
///
/// Alpha is dropped and other color types are converted to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<Rgb24Image, ImageIoError> {
    let decoded = image::open(path)
        .map_err(|source| ImageIoError::Image { path: path.display().to_string(), source })?;
    Ok(Rgb24Image::from_rgb_image(&decoded.to_rgb8()))
}

/// Save a 24-bit RGB image, creating parent directories as needed.
pub fn save_image(image: &Rgb24Image, path: &Path) -> Result<(), ImageIoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let buffer: RgbImage = image.to_rgb_image();
    buffer
        .save(path)
        .map_err(|source| ImageIoError::Image { path: path.display().to_string(), source })?;
    Ok(())
}
