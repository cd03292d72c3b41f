//! Apply command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::PxfConfig;
use crate::filters::{parse_filter_str, Filter};
use crate::model::ImageModel;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Load `input`, run each filter in order and save to `output`.
///
/// Every filter string is parsed before the image is touched, so a typo in
/// the chain never leaves a half-written output.
pub fn run_apply(input: &Path, output: &Path, filters: &[String], config: &PxfConfig) -> ExitCode {
    let mut chain: Vec<Filter> = Vec::with_capacity(filters.len());
    for raw in filters {
        match parse_filter_str(raw) {
            Ok(filter) => chain.push(filter),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let mut model = ImageModel::from_config(&config.mosaic);
    if let Err(e) = model.load_image(input) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    for filter in &chain {
        log::debug!("applying {}", filter);
        if let Err(e) = model.apply(filter) {
            eprintln!("Error applying {}: {}", filter.label(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if let Err(e) = model.save_image(output) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved {}", output.display());
    ExitCode::from(EXIT_SUCCESS)
}
