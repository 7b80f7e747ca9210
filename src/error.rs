//! Error types for the analyzer's ambient layers.
//!
//! The message store and the view builder are total: they never fail. Errors only
//! come from the layers around them, namely loading configuration, opening or
//! reading frame sources, and wiring the analyzer together.
//!
//! ## Error Categories
//!
//! - **Source Errors**: a bus could not be opened or a read failed
//! - **File Errors**: configuration files that cannot be read
//! - **Config Errors**: configuration that parses but is not usable
//! - **Platform Errors**: features that need a specific operating system
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use canscope::AnalyzerError;
//!
//! let error = AnalyzerError::source_failed("can0", "interface is down");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analyzer operations.
pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;

/// Main error type for analyzer operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalyzerError {
    #[error("Frame source for bus '{bus}' failed: {reason}")]
    Source {
        bus: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Config file error: {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {details}")]
    Config { details: String },

    #[error("{feature} is only available on {required_platform}")]
    UnsupportedPlatform { feature: String, required_platform: String },
}

impl AnalyzerError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnalyzerError::Source { .. } => true,
            AnalyzerError::File { .. } => false,
            AnalyzerError::Config { .. } => false,
            AnalyzerError::UnsupportedPlatform { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            AnalyzerError::Source { .. } => vec![
                "Check that the CAN interface is up (ip link set can0 up)",
                "Verify the bitrate matches the rest of the bus",
                "Check cabling and bus termination",
            ],
            AnalyzerError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
            AnalyzerError::Config { .. } => vec![
                "Check the configuration against the documented fields",
                "Staleness timeout and refresh interval must be positive",
            ],
            AnalyzerError::UnsupportedPlatform { .. } => vec![
                "Use the channel source to feed frames from another transport",
                "Check documentation for platform requirements",
            ],
        }
    }

    /// Helper constructor for frame source failures.
    pub fn source_failed(bus: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalyzerError::Source { bus: bus.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for frame source failures with an underlying cause.
    pub fn source_failed_with(
        bus: impl Into<String>,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        AnalyzerError::Source { bus: bus.into(), reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        AnalyzerError::File { path, source }
    }

    /// Helper constructor for configuration errors.
    pub fn invalid_config(details: impl Into<String>) -> Self {
        AnalyzerError::Config { details: details.into() }
    }

    /// Helper constructor for unsupported platform errors.
    pub fn unsupported_platform(
        feature: impl Into<String>,
        required_platform: impl Into<String>,
    ) -> Self {
        AnalyzerError::UnsupportedPlatform {
            feature: feature.into(),
            required_platform: required_platform.into(),
        }
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
