//! Script command implementation

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use crate::config::PxfConfig;
use crate::model::ImageModel;
use crate::script::{run_script, TextView};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Run the interpreter over `file`, or stdin when no file is given.
///
/// Exits with an error code when any command reported an error.
pub fn run_script_command(file: Option<&Path>, config: &PxfConfig) -> ExitCode {
    let script = match file {
        Some(path) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
            buf
        }
    };

    let mut model = ImageModel::from_config(&config.mosaic);
    let mut view = TextView::new(io::stdout().lock());

    match run_script(&script, &mut model, &mut view) {
        Ok(summary) => {
            log::info!(
                "ran {} commands, {} failed{}",
                summary.commands,
                summary.errors,
                if summary.quit { ", quit" } else { "" }
            );
            if summary.errors > 0 {
                ExitCode::from(EXIT_ERROR)
            } else {
                ExitCode::from(EXIT_SUCCESS)
            }
        }
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
