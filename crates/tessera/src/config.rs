//! Runtime configuration
//!
//! Read from a `tessera.toml` style file; every field is optional:
//!
//! ```toml
//! element_prefix = "app-"
//! log_filter = "tessera_component=debug,info"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use tessera_component::{is_valid_prefix, DEFAULT_ELEMENT_PREFIX};

/// Rejected configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid element prefix {0:?}: expected lowercase ASCII ending with '-'")]
    InvalidPrefix(String),
}

/// Process-wide runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Prefix of derived element names
    pub element_prefix: String,
    /// `tracing` filter directives used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            element_prefix: DEFAULT_ELEMENT_PREFIX.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RuntimeConfig =
            toml::from_str(content).context("Failed to parse runtime config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !is_valid_prefix(&self.element_prefix) {
            return Err(ConfigError::InvalidPrefix(self.element_prefix.clone()));
        }
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize runtime config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.element_prefix, "c-");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_config() {
        let config = RuntimeConfig::from_toml_str(r#"element_prefix = "app-""#).unwrap();
        assert_eq!(config.element_prefix, "app-");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        for prefix in ["App-", "app", "-", "ap p-"] {
            let err = RuntimeConfig::from_toml_str(&format!("element_prefix = {:?}", prefix))
                .unwrap_err();
            assert_eq!(
                err.downcast_ref::<ConfigError>(),
                Some(&ConfigError::InvalidPrefix(prefix.to_string()))
            );
        }
    }

    #[test]
    fn test_malformed_toml() {
        let err = RuntimeConfig::from_toml_str("element_prefix = ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse runtime config"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tessera-config-{}.toml", std::process::id()));
        fs::write(&path, "log_filter = \"debug\"\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.log_filter, "debug");

        assert!(RuntimeConfig::load(&path).is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = RuntimeConfig {
            element_prefix: "ui-".to_string(),
            log_filter: "warn".to_string(),
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("element_prefix = \"ui-\""));
        assert_eq!(RuntimeConfig::from_toml_str(&text).unwrap(), config);
    }
}
