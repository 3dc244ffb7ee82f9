//! CLI error type.

use autocall_core::ConfigError;
use autocall_optimiser::CalibrationError;
use autocall_pricing::PricingError;

/// Convenience alias used throughout the binary.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the `autocall` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A scenario file path did not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A scenario file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the file being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A scenario file could not be parsed as TOML.
    #[error("Failed to parse scenario {path}: {source}")]
    ScenarioParse {
        /// Path of the offending file.
        path: String,
        /// Underlying TOML error, naming the offending key or tag.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A flag or scenario value was malformed or inconsistent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The scenario produced an invalid contract or engine configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A pricing run failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A calibration run failed.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// A report could not be serialised for output.
    #[error("Failed to serialise output: {0}")]
    Serialise(#[from] serde_json::Error),
}
