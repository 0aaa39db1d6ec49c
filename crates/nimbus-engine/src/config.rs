//! Engine configuration loaded from TOML

use nimbus_core::{NimbusError, Result, WeatherKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Longest accepted loop interval or switch duration
const MAX_INTERVAL_MS: u64 = 1000;

/// Timing and startup options for a [`WeatherEngine`](crate::WeatherEngine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Update loop cadence
    pub data_update_interval_ms: u64,
    /// Draw loop cadence
    pub draw_interval_ms: u64,
    /// Length of each half of a cross-fade between kinds
    pub switch_duration_ms: u64,
    pub orientation_enabled: bool,
    pub initial_kind: WeatherKind,
    /// Fixed RNG seed for reproducible runs; wall clock when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_update_interval_ms: 16,
            draw_interval_ms: 16,
            switch_duration_ms: 150,
            orientation_enabled: true,
            initial_kind: WeatherKind::None,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject zero and oversized intervals
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("data_update_interval_ms", self.data_update_interval_ms),
            ("draw_interval_ms", self.draw_interval_ms),
            ("switch_duration_ms", self.switch_duration_ms),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(NimbusError::ValidationError(format!(
                    "{field} must be greater than zero"
                )));
            }
            if value > MAX_INTERVAL_MS {
                return Err(NimbusError::ValueOutOfRange {
                    field: field.to_string(),
                    min: 1.0,
                    max: MAX_INTERVAL_MS as f64,
                    value: value as f64,
                });
            }
        }
        Ok(())
    }

    pub fn data_update_interval(&self) -> Duration {
        Duration::from_millis(self.data_update_interval_ms)
    }

    pub fn draw_interval(&self) -> Duration {
        Duration::from_millis(self.draw_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_loop_cadence() {
        let config = EngineConfig::default();
        assert_eq!(config.data_update_interval(), Duration::from_millis(16));
        assert_eq!(config.draw_interval(), Duration::from_millis(16));
        assert_eq!(config.switch_duration_ms, 150);
        assert!(config.orientation_enabled);
        assert_eq!(config.initial_kind, WeatherKind::None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
initial_kind = "rain_night"
seed = 7
"#,
        )
        .unwrap();
        assert_eq!(config.initial_kind, WeatherKind::RainNight);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.draw_interval_ms, 16);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = EngineConfig::from_toml_str("draw_interval_ms = 0").unwrap_err();
        assert!(matches!(err, NimbusError::ValidationError(_)));
        let err = EngineConfig::from_toml_str("switch_duration_ms = 5000").unwrap_err();
        assert!(matches!(err, NimbusError::ValueOutOfRange { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("initial_kind = \"tornado\"").unwrap_err();
        assert!(matches!(err, NimbusError::TomlParseError(_)));
    }

    #[test]
    fn default_config_round_trips() {
        let config = EngineConfig {
            seed: Some(3),
            ..EngineConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::load(Path::new("/nonexistent/nimbus.toml")).unwrap_err();
        assert!(matches!(err, NimbusError::IoError(_)));
    }
}
