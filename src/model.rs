//! Image model
//!
//! Holds at most one image and applies filters to it in place. Every engine
//! result passes back through [`Rgb24Image::replace`], so the stored samples
//! stay in `[0, 255]` no matter what the engine produced.

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::config::MosaicConfig;
use crate::error::FilterError;
use crate::filters::{self, Filter};
use crate::grid::{Rgb24Image, RgbGrid};
use crate::io::{self, ImageIoError};
use crate::rng::{SeedSource, XorShiftRng};

/// Error raised by [`ImageModel`] operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An operation needs an image but none has been loaded
    #[error("Image must be loaded before {action}.")]
    NotLoaded { action: String },
    /// A filter rejected its arguments
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// Reading or writing an image file failed
    #[error(transparent)]
    Io(#[from] ImageIoError),
}

/// Stateful wrapper around the filter engines.
#[derive(Debug, Clone)]
pub struct ImageModel<R = XorShiftRng> {
    image: Option<Rgb24Image>,
    rng: R,
    default_seeds: usize,
}

impl ImageModel<XorShiftRng> {
    /// Create an empty model with default mosaic settings.
    pub fn new() -> Self {
        Self::from_config(&MosaicConfig::default())
    }

    /// Create an empty model seeded from configuration.
    pub fn from_config(config: &MosaicConfig) -> Self {
        Self::with_rng(XorShiftRng::new(config.seed), config.default_seeds)
    }
}

impl Default for ImageModel<XorShiftRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SeedSource> ImageModel<R> {
    /// Create an empty model using `rng` for mosaic seeding.
    pub fn with_rng(rng: R, default_seeds: usize) -> Self {
        Self { image: None, rng, default_seeds }
    }

    /// True once an image has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// The current image, if any.
    pub fn image(&self) -> Option<&Rgb24Image> {
        self.image.as_ref()
    }

    /// The current grid, if any.
    pub fn grid(&self) -> Option<&RgbGrid> {
        self.image.as_ref().map(Rgb24Image::view)
    }

    /// Load an image file, replacing any current image.
    pub fn load_image(&mut self, path: &Path) -> Result<(), ModelError> {
        let image = io::load_image(path)?;
        info!("loaded {} ({}x{})", path.display(), image.width(), image.height());
        self.image = Some(image);
        Ok(())
    }

    /// Use `grid` as the current image. Samples are clamped.
    pub fn load_grid(&mut self, grid: RgbGrid) {
        self.image = Some(grid.into());
    }

    /// Save the current image.
    pub fn save_image(&self, path: &Path) -> Result<(), ModelError> {
        let image = self.require("saving")?;
        io::save_image(image, path)?;
        info!("saved {}", path.display());
        Ok(())
    }

    /// Apply `filter` to the current image.
    pub fn apply(&mut self, filter: &Filter) -> Result<(), ModelError> {
        match *filter {
            Filter::Blur => self.apply_blur(),
            Filter::Sharpen => self.apply_sharpen(),
            Filter::Greyscale => self.apply_greyscale(),
            Filter::Sepia => self.apply_sepia(),
            Filter::Dither => self.apply_dither(),
            Filter::Mosaic { seeds } => self.apply_mosaic(seeds.unwrap_or(self.default_seeds)),
            Filter::EdgeDetection => self.apply_edge_detection(),
            Filter::HistogramEqualization => self.apply_histogram_equalization(),
            Filter::Crop { start_x, start_y, end_x, end_y } => {
                self.crop(start_x, start_y, end_x, end_y)
            }
        }
    }

    pub fn apply_blur(&mut self) -> Result<(), ModelError> {
        self.update("applying blur", |grid, _| Ok(filters::apply_blur(grid)))
    }

    pub fn apply_sharpen(&mut self) -> Result<(), ModelError> {
        self.update("applying sharpen", |grid, _| Ok(filters::apply_sharpen(grid)))
    }

    pub fn apply_greyscale(&mut self) -> Result<(), ModelError> {
        self.update("applying greyscale", |grid, _| Ok(filters::apply_greyscale(grid)))
    }

    pub fn apply_sepia(&mut self) -> Result<(), ModelError> {
        self.update("applying sepia", |grid, _| Ok(filters::apply_sepia(grid)))
    }

    pub fn apply_dither(&mut self) -> Result<(), ModelError> {
        self.update("applying dithering", |grid, _| Ok(filters::apply_dither(grid)))
    }

    /// Apply a mosaic with `seeds` cells.
    pub fn apply_mosaic(&mut self, seeds: usize) -> Result<(), ModelError> {
        self.update("applying mosaic", |grid, rng| filters::apply_mosaic(grid, seeds, rng))
    }

    pub fn apply_edge_detection(&mut self) -> Result<(), ModelError> {
        self.update("applying edge detection", |grid, _| Ok(filters::apply_edge_detection(grid)))
    }

    pub fn apply_histogram_equalization(&mut self) -> Result<(), ModelError> {
        self.update("applying histogram equalization", |grid, _| {
            Ok(filters::apply_histogram_equalization(grid))
        })
    }

    /// Crop the current image to `[start_x, end_x) x [start_y, end_y)`.
    pub fn crop(
        &mut self,
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
    ) -> Result<(), ModelError> {
        self.update("cropping", |grid, _| filters::crop(grid, start_x, start_y, end_x, end_y))
    }

    /// Cropped copy of the current image; the stored image is left as is.
    pub fn crop_preview(
        &self,
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
    ) -> Result<RgbGrid, ModelError> {
        let image = self.require("previewing a crop")?;
        Ok(filters::crop(image.view(), start_x, start_y, end_x, end_y)?)
    }

    fn require(&self, action: &str) -> Result<&Rgb24Image, ModelError> {
        self.image.as_ref().ok_or_else(|| ModelError::NotLoaded { action: action.to_string() })
    }

    /// Run `engine` on the current grid and commit its output.
    fn update(
        &mut self,
        action: &str,
        engine: impl FnOnce(&RgbGrid, &mut R) -> Result<RgbGrid, FilterError>,
    ) -> Result<(), ModelError> {
        let image = self
            .image
            .as_mut()
            .ok_or_else(|| ModelError::NotLoaded { action: action.to_string() })?;
        let output = engine(image.view(), &mut self.rng)?;
        image.replace(output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> RgbGrid {
        RgbGrid::from_fn(6, 4, |r, c| [(r * 60) as i32, (c * 45) as i32, 128])
    }

    fn assert_in_range(model: &ImageModel) {
        let grid = model.grid().expect("image loaded");
        assert!(grid.pixels().iter().flatten().all(|v| (0..=255).contains(v)));
    }

    #[test]
    fn test_filters_before_load_fail() {
        let mut model = ImageModel::new();
        let err = model.apply_blur().unwrap_err();
        assert_eq!(err.to_string(), "Image must be loaded before applying blur.");
        assert!(matches!(model.apply_mosaic(3), Err(ModelError::NotLoaded { .. })));
        assert!(matches!(model.save_image(Path::new("x.png")), Err(ModelError::NotLoaded { .. })));
        assert!(matches!(model.crop_preview(0, 0, 1, 1), Err(ModelError::NotLoaded { .. })));
    }

    #[test]
    fn test_every_filter_commits_clamped_output() {
        let filters = [
            Filter::Blur,
            Filter::Sharpen,
            Filter::Greyscale,
            Filter::Sepia,
            Filter::Dither,
            Filter::Mosaic { seeds: Some(5) },
            Filter::EdgeDetection,
            Filter::HistogramEqualization,
            Filter::Crop { start_x: 1, start_y: 1, end_x: 5, end_y: 3 },
        ];
        for filter in filters {
            let mut model = ImageModel::new();
            model.load_grid(gradient());
            model.apply(&filter).unwrap();
            assert_in_range(&model);
        }
    }

    #[test]
    fn test_load_grid_clamps_samples() {
        let mut model = ImageModel::new();
        model.load_grid(RgbGrid::from_rows(vec![vec![[-40, 128, 300]]]).unwrap());
        assert_eq!(model.grid().unwrap().get(0, 0), [0, 128, 255]);
    }

    #[test]
    fn test_sepia_on_white_is_clamped() {
        let mut model = ImageModel::new();
        model.load_grid(RgbGrid::filled(2, 2, [255; 3]));
        model.apply_sepia().unwrap();
        assert_eq!(model.grid().unwrap().get(0, 0), [255, 255, 239]);
    }

    #[test]
    fn test_crop_preview_leaves_image_alone() {
        let mut model = ImageModel::new();
        model.load_grid(gradient());

        let preview = model.crop_preview(0, 0, 2, 2).unwrap();
        assert_eq!(preview.width(), 2);
        assert_eq!(model.grid().unwrap().width(), 6);

        model.crop(0, 0, 2, 2).unwrap();
        assert_eq!(model.grid().unwrap(), &preview);
    }

    #[test]
    fn test_invalid_arguments_keep_current_image() {
        let mut model = ImageModel::new();
        model.load_grid(gradient());

        assert!(matches!(model.apply_mosaic(0), Err(ModelError::Filter(FilterError::InvalidSeedCount(0)))));
        assert!(matches!(model.crop(0, 0, 7, 1), Err(ModelError::Filter(_))));
        assert_eq!(model.grid().unwrap(), &gradient());
    }

    #[test]
    fn test_mosaic_without_count_uses_default() {
        let config = MosaicConfig { seed: 3, default_seeds: 1 };
        let mut model = ImageModel::from_config(&config);
        model.load_grid(RgbGrid::from_rows(vec![vec![[0; 3], [10; 3]]]).unwrap());

        model.apply(&Filter::Mosaic { seeds: None }).unwrap();
        assert!(model.grid().unwrap().pixels().iter().all(|p| *p == [5; 3]));
    }

    #[test]
    fn test_same_seed_same_mosaic() {
        let run = || {
            let mut model = ImageModel::from_config(&MosaicConfig { seed: 11, default_seeds: 4 });
            model.load_grid(gradient());
            model.apply_mosaic(4).unwrap();
            model.grid().unwrap().clone()
        };
        assert_eq!(run(), run());
    }
}
