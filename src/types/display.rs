//! Display modes for rendered views

use serde::{Deserialize, Serialize};

/// Default staleness timeout in seconds
pub const DEFAULT_STALENESS_TIMEOUT: f64 = 10.0;

/// Number base used when rendering identifiers or payload bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Radix {
    #[default]
    Hex,
    Dec,
}

impl Radix {
    /// Short label used in table headers
    pub fn label(self) -> &'static str {
        match self {
            Radix::Hex => "hex",
            Radix::Dec => "dec",
        }
    }
}

/// Which time value the timestamp column shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampMode {
    /// Receipt time of the last frame
    Absolute,
    /// Time between the two most recent frames
    #[default]
    Delta,
}

/// Row ordering of a rendered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// First-seen order
    None,
    /// Numeric identifier, buses interleaved
    ById,
    /// Bus name, first-seen order within a bus
    ByBus,
    /// Bus name, then numeric identifier
    #[default]
    ByBusThenId,
}

/// How the view builder formats and orders rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub id_radix: Radix,
    pub data_radix: Radix,
    pub timestamp_mode: TimestampMode,
    pub sort_mode: SortMode,
    /// Messages older than this many seconds are hidden
    pub staleness_timeout: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            id_radix: Radix::Hex,
            data_radix: Radix::Hex,
            timestamp_mode: TimestampMode::Delta,
            sort_mode: SortMode::ByBusThenId,
            staleness_timeout: DEFAULT_STALENESS_TIMEOUT,
        }
    }
}

impl DisplayConfig {
    pub fn with_id_radix(mut self, radix: Radix) -> Self {
        self.id_radix = radix;
        self
    }

    pub fn with_data_radix(mut self, radix: Radix) -> Self {
        self.data_radix = radix;
        self
    }

    pub fn with_timestamp_mode(mut self, mode: TimestampMode) -> Self {
        self.timestamp_mode = mode;
        self
    }

    pub fn with_sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    pub fn with_staleness_timeout(mut self, seconds: f64) -> Self {
        self.staleness_timeout = seconds;
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> crate::Result<()> {
        if !self.staleness_timeout.is_finite() || self.staleness_timeout <= 0.0 {
            return Err(crate::AnalyzerError::invalid_config(format!(
                "staleness_timeout must be a positive number of seconds, got {}",
                self.staleness_timeout
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_layout() {
        let config = DisplayConfig::default();

        assert_eq!(config.id_radix, Radix::Hex);
        assert_eq!(config.data_radix, Radix::Hex);
        assert_eq!(config.timestamp_mode, TimestampMode::Delta);
        assert_eq!(config.sort_mode, SortMode::ByBusThenId);
        assert_eq!(config.staleness_timeout, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_timeout_is_rejected() {
        for timeout in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = DisplayConfig::default().with_staleness_timeout(timeout);
            assert!(config.validate().is_err(), "timeout {} should be rejected", timeout);
        }
    }

    #[test]
    fn modes_use_snake_case_names() {
        let config: DisplayConfig = serde_yaml_ng::from_str(
            "id_radix: dec\ndata_radix: hex\ntimestamp_mode: absolute\nsort_mode: by_bus_then_id\n",
        )
        .unwrap();

        assert_eq!(config.id_radix, Radix::Dec);
        assert_eq!(config.timestamp_mode, TimestampMode::Absolute);
        assert_eq!(config.sort_mode, SortMode::ByBusThenId);
        assert_eq!(config.staleness_timeout, DEFAULT_STALENESS_TIMEOUT);
    }
}
