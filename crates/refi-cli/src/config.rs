//! CLI configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use refi_core::summary::DEFAULT_WINDOW_MONTHS;

const DEFAULT_CONFIG_FILE: &str = "refi.toml";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding persisted offers
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Months summed for the comparison table
    #[serde(default = "default_window_months")]
    pub window_months: usize,

    /// First installment month for exports (YYYY-MM); current month when unset
    #[serde(default)]
    pub start_month: Option<String>,
}

fn default_store_dir() -> String {
    "./.refi".to_string()
}

fn default_window_months() -> usize {
    DEFAULT_WINDOW_MONTHS
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            window_months: default_window_months(),
            start_month: None,
        }
    }
}

impl CliConfig {
    /// Loads `path`, or `./refi.toml` if it exists, or the defaults.
    /// An explicitly named file must exist.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => Self::from_file(p),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path, e))?;
        let config = Self::from_toml(&content)
            .map_err(|e| format!("Invalid config '{}': {}", path, e))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = CliConfig::from_toml("window_months = 24\nstart_month = \"2025-09\"").unwrap();
        assert_eq!(config.window_months, 24);
        assert_eq!(config.start_month.as_deref(), Some("2025-09"));
        assert_eq!(config.store_dir, "./.refi");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(CliConfig::load(Some("/nonexistent/refi.toml")).is_err());
    }
}
