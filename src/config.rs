//! Application configuration
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or none at all) works. Command-line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::payment::{SimulatedPayment, DEFAULT_PAYMENT_DELAY};

/// Longest simulated payment delay accepted, in milliseconds
pub const MAX_PAYMENT_DELAY_MS: u64 = 60_000;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the signed-in session is saved
    pub session_file: PathBuf,
    /// Marketplace data to load instead of the built-in data
    pub data_file: Option<PathBuf>,
    /// Log file used while the TUI owns the terminal
    pub log_file: PathBuf,
    /// Default tracing filter; `RUST_LOG` takes precedence
    pub log_filter: String,
    pub payment_delay_ms: u64,
    /// Make every payment fail, to exercise the retry path
    pub simulate_payment_failure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_file: PathBuf::from("creatorbook-session.json"),
            data_file: None,
            log_file: PathBuf::from("creatorbook.log"),
            log_filter: "info".to_string(),
            payment_delay_ms: DEFAULT_PAYMENT_DELAY.as_millis() as u64,
            simulate_payment_failure: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.session_file.as_os_str().is_empty() {
            anyhow::bail!("session_file must be specified");
        }
        if self.log_file.as_os_str().is_empty() {
            anyhow::bail!("log_file must be specified");
        }
        if self.log_filter.trim().is_empty() {
            anyhow::bail!("log_filter must be specified");
        }
        if let Some(data_file) = &self.data_file {
            if data_file.as_os_str().is_empty() {
                anyhow::bail!("data_file cannot be an empty path");
            }
        }
        if self.payment_delay_ms > MAX_PAYMENT_DELAY_MS {
            anyhow::bail!(
                "payment_delay_ms must be at most {} (got {})",
                MAX_PAYMENT_DELAY_MS,
                self.payment_delay_ms
            );
        }
        Ok(())
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    /// Payment processor described by this configuration.
    pub fn payment_processor(&self) -> SimulatedPayment {
        let processor = SimulatedPayment::new(self.payment_delay());
        if self.simulate_payment_failure {
            processor.failing()
        } else {
            processor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.payment_delay(), Duration::from_millis(2000));
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{ "payment_delay_ms": 10, "simulate_payment_failure": true }"#)
            .unwrap();
        temp_file.flush().unwrap();

        let config = AppConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.payment_delay_ms, 10);
        assert!(config.simulate_payment_failure);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.session_file, PathBuf::from("creatorbook-session.json"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let config = AppConfig {
            data_file: Some(PathBuf::from("marketplace.json")),
            log_filter: "creatorbook=debug".to_string(),
            ..Default::default()
        };
        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();

        let loaded = AppConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_file() {
        assert!(AppConfig::load_from_file("/nonexistent/config.json").is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ invalid json }").unwrap();
        temp_file.flush().unwrap();
        assert!(AppConfig::load_from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_validation_rejects_huge_delay() {
        let config = AppConfig {
            payment_delay_ms: MAX_PAYMENT_DELAY_MS + 1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("payment_delay_ms"));
    }

    #[test]
    fn test_validation_rejects_empty_filter() {
        let config = AppConfig {
            log_filter: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_payment_processor_follows_config() {
        let config = AppConfig {
            payment_delay_ms: 0,
            ..Default::default()
        };
        assert!(config.payment_processor().delay().is_zero());
    }
}
