//! CLI command implementations

pub mod config;
pub mod kinds;
pub mod render;
pub mod run;

use anyhow::{Context, Result};
use nimbus_core::WeatherKind;
use nimbus_engine::EngineConfig;
use std::path::Path;

/// Load the config file if one was given, defaults otherwise
pub fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => Ok(EngineConfig::default()),
    }
}

/// Strict kind parsing; the CLI rejects names the engine would ignore
pub fn parse_kind(name: &str) -> Result<WeatherKind> {
    name.parse::<WeatherKind>()
        .with_context(|| format!("Run `nimbus kinds` to list valid names (got '{}')", name))
}
