//! Configuration loading and CLI definitions.
//!
//! A [`Config`] is read from a json/jsonc/yaml/toml file with [`load_config`],
//! patched with [`apply_overrides`] and checked with [`validate_config`]
//! before anything else starts.

mod cli;
mod defaults;
mod loader;
mod types;
mod validate;

pub use cli::{CliOverrides, apply_overrides};
pub use loader::{ConfigError, load_config};
pub use types::*;
pub use validate::validate_config;
