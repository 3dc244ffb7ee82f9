//! CLI command implementations.
//!
//! Each submodule implements one subcommand over a loaded scenario.

pub mod calibrate;
pub mod price;

use crate::{CliError, Result};

/// Output format for command reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    /// Human-readable text on stdout.
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

impl OutputFormat {
    /// Parses a `--format` flag value.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: text, json",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::parse("yaml"),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
