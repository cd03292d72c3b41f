//! Configuration module
//!
//! Provides types and parsing for `pxf.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, load_config, merge_cli_overrides, CliOverrides, ConfigError,
    CONFIG_FILE_NAME,
};
pub use schema::*;
