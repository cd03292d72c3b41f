//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod apply;
mod script;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PxfConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// pxf - Apply pixel filters to images
#[derive(Parser)]
#[command(name = "pxf")]
#[command(about = "pxf - Blur, sharpen, dither, mosaic and otherwise transform RGB images")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of searching for pxf.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log engine details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load an image, apply filters in order and save the result
    Apply {
        /// Input image file
        input: PathBuf,

        /// Output image file (format chosen from the extension)
        #[arg(short, long)]
        output: PathBuf,

        /// Filter to apply; repeat for a chain.
        /// One of: blur, sharpen, greyscale, sepia, dither, mosaic[:n],
        /// edge-detection, histogram-equalization, crop:x0,y0,x1,y1
        #[arg(short, long = "filter", required = true)]
        filters: Vec<String>,

        /// Mosaic seed (overrides pxf.toml)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a batch of interpreter commands from a file or stdin
    Script {
        /// Script file (omit to read stdin)
        file: Option<PathBuf>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Apply { input, output, filters, seed } => {
            let overrides = CliOverrides { seed };
            let config = match resolve_config(cli.config.as_deref(), &overrides) {
                Ok(config) => config,
                Err(code) => return code,
            };
            apply::run_apply(&input, &output, &filters, &config)
        }
        Commands::Script { file } => {
            let config = match resolve_config(cli.config.as_deref(), &CliOverrides::default()) {
                Ok(config) => config,
                Err(code) => return code,
            };
            script::run_script_command(file.as_deref(), &config)
        }
    }
}

/// `-v` turns on debug output; `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<PxfConfig, ExitCode> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, overrides);
            Ok(config)
        }
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}
