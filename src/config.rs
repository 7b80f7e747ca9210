//! Analyzer configuration
//!
//! Configuration is plain YAML. Every field is optional:
//!
//! ```yaml
//! buses: [can0, can1]
//! refresh_interval_ms: 500
//! display:
//!   id_radix: hex            # hex | dec
//!   data_radix: hex          # hex | dec
//!   timestamp_mode: delta    # absolute | delta
//!   sort_mode: by_bus_then_id  # none | by_id | by_bus | by_bus_then_id
//!   staleness_timeout: 10.0  # seconds
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::types::DisplayConfig;
use crate::{AnalyzerError, Result};

fn default_buses() -> Vec<String> {
    vec!["can0".to_string(), "can1".to_string()]
}

fn default_refresh_interval_ms() -> u64 {
    500
}

/// Top-level analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Interfaces to monitor
    #[serde(default = "default_buses")]
    pub buses: Vec<String>,

    /// Terminal refresh period
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            buses: default_buses(),
            refresh_interval_ms: default_refresh_interval_ms(),
            display: DisplayConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AnalyzerConfig = serde_yaml_ng::from_str(yaml)
            .map_err(|e| AnalyzerError::invalid_config(format!("YAML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnalyzerError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml_str(&content)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        self.display.validate()?;

        if self.refresh_interval_ms == 0 {
            return Err(AnalyzerError::invalid_config("refresh_interval_ms must be positive"));
        }

        let mut seen = HashSet::new();
        for bus in &self.buses {
            if bus.trim().is_empty() {
                return Err(AnalyzerError::invalid_config("bus names must not be empty"));
            }
            if !seen.insert(bus.as_str()) {
                return Err(AnalyzerError::invalid_config(format!("bus '{}' listed twice", bus)));
            }
        }

        Ok(())
    }

    /// Terminal refresh period as a duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Radix, SortMode, TimestampMode};

    #[test]
    fn empty_document_gives_defaults() {
        let config = AnalyzerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.buses, vec!["can0", "can1"]);
        assert_eq!(config.refresh_interval(), Duration::from_millis(500));
    }

    #[test]
    fn full_document_parses() {
        let yaml = r#"
            buses: [vcan0]
            refresh_interval_ms: 250
            display:
              id_radix: dec
              data_radix: dec
              timestamp_mode: absolute
              sort_mode: by_id
              staleness_timeout: 5.0
        "#;

        let config = AnalyzerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.buses, vec!["vcan0"]);
        assert_eq!(config.refresh_interval_ms, 250);
        assert_eq!(config.display.id_radix, Radix::Dec);
        assert_eq!(config.display.data_radix, Radix::Dec);
        assert_eq!(config.display.timestamp_mode, TimestampMode::Absolute);
        assert_eq!(config.display.sort_mode, SortMode::ById);
        assert_eq!(config.display.staleness_timeout, 5.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for yaml in [
            "display: { staleness_timeout: 0 }",
            "display: { staleness_timeout: -2.5 }",
            "refresh_interval_ms: 0",
            "buses: [can0, can0]",
            "buses: ['']",
            "display: { sort_mode: alphabetical }",
        ] {
            let err = AnalyzerConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, AnalyzerError::Config { .. }), "{} should be rejected", yaml);
        }
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let err = AnalyzerConfig::load("/nonexistent/canscope.yaml").unwrap_err();
        assert!(matches!(err, AnalyzerError::File { .. }));
    }
}
