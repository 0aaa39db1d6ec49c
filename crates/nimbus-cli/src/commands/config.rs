//! Print or validate engine configuration

use anyhow::{Context, Result};
use nimbus_engine::EngineConfig;
use std::path::Path;

pub fn run(check: Option<&str>) -> Result<()> {
    match check {
        Some(path) => {
            let config = EngineConfig::load(Path::new(path))
                .with_context(|| format!("Invalid config {}", path))?;
            println!("{} is valid", path);
            log::info!("{:?}", config);
        }
        None => {
            let text = EngineConfig::default()
                .to_toml_string()
                .context("Failed to serialize default config")?;
            print!("{}", text);
        }
    }
    Ok(())
}
