//! Vault configuration via `watchvault.toml`
//!
//! A default `watchvault.toml` is written on first open. To change settings,
//! edit the file and restart.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use watchvault_core::{Error, Result};

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "watchvault.toml";

/// How aggregate documents are written back after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Compare-and-set on the version that was read; re-run the cycle on
    /// conflict, then fail with `Conflict`.
    Optimistic,
    /// Unconditional last-writer-wins `SET`. Concurrent mutations of the
    /// same document can silently lose updates.
    Overwrite,
}

/// How long an optimistic write keeps re-reading a contended document.
///
/// Persisted in `watchvault.toml` under the `[retry]` section. Missing keys
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Fresh reads allowed after the first lost compare-and-set (0 = fail at once)
    pub max_retries: usize,
    /// Pause before the first re-read, in milliseconds
    pub base_delay_ms: u64,
    /// Upper bound on any single pause, in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            base_delay_ms: 1,
            max_delay_ms: 50,
        }
    }
}

impl RetryConfig {
    /// Whether re-read number `retry` (1-based) is still within budget.
    pub(crate) fn allows(&self, retry: usize) -> bool {
        retry <= self.max_retries
    }

    /// Pause before re-read number `retry` (1-based).
    ///
    /// Doubles from `base_delay_ms` on every lost race and never exceeds
    /// `max_delay_ms`.
    pub(crate) fn backoff(&self, retry: usize) -> Duration {
        let doublings = retry.saturating_sub(1).min(63) as u32;
        let delay_ms = self
            .base_delay_ms
            .saturating_mul(1u64 << doublings)
            .min(self.max_delay_ms);
        Duration::from_millis(delay_ms)
    }
}

/// Vault configuration loaded from `watchvault.toml`.
///
/// # Example
///
/// ```toml
/// write_mode = "optimistic"
///
/// [retry]
/// max_retries = 10
/// base_delay_ms = 1
/// max_delay_ms = 50
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Write mode: `"optimistic"` or `"overwrite"`.
    #[serde(default = "default_write_mode_str")]
    pub write_mode: String,
    /// Retry policy for optimistic writes.
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_write_mode_str() -> String {
    "optimistic".to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            write_mode: default_write_mode_str(),
            retry: RetryConfig::default(),
        }
    }
}

impl VaultConfig {
    /// Config that reproduces unconditional last-writer-wins writes.
    pub fn overwrite() -> Self {
        Self {
            write_mode: "overwrite".to_string(),
            ..Self::default()
        }
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Parse the write mode string into a `WriteMode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"optimistic"` or `"overwrite"`.
    pub fn write_mode(&self) -> Result<WriteMode> {
        match self.write_mode.as_str() {
            "optimistic" => Ok(WriteMode::Optimistic),
            "overwrite" => Ok(WriteMode::Overwrite),
            other => Err(Error::InvalidInput(format!(
                "Invalid write_mode '{}' in {}. Expected \"optimistic\" or \"overwrite\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# WatchVault configuration
#
# Write mode for aggregate documents: "optimistic" (default) or "overwrite"
#   "optimistic" = compare-and-set on the version read; concurrent writers
#                  are retried from a fresh read, never silently overwritten
#   "overwrite"  = unconditional SET; concurrent writers can lose updates
write_mode = "optimistic"

# Retry policy for optimistic writes that lose a race.
[retry]
max_retries = 10
base_delay_ms = 1
max_delay_ms = 50
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VaultConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidInput(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        // Validate the write mode eagerly
        config.write_mode()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::SerializationError(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_optimistic() {
        let config = VaultConfig::default();
        assert_eq!(config.write_mode().unwrap(), WriteMode::Optimistic);
        assert_eq!(config.retry, RetryConfig::default());
    }

    #[test]
    fn parse_overwrite() {
        let config: VaultConfig = toml::from_str("write_mode = \"overwrite\"").unwrap();
        assert_eq!(config.write_mode().unwrap(), WriteMode::Overwrite);
    }

    #[test]
    fn parse_invalid_mode_returns_error() {
        let config: VaultConfig = toml::from_str("write_mode = \"eventual\"").unwrap();
        assert!(matches!(config.write_mode(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn default_toml_parses_correctly() {
        let config: VaultConfig = toml::from_str(VaultConfig::default_toml()).unwrap();
        assert_eq!(config, VaultConfig::default());
    }

    #[test]
    fn partial_retry_section_uses_defaults() {
        let config: VaultConfig = toml::from_str("[retry]\nmax_retries = 3\n").unwrap();
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.max_delay_ms, RetryConfig::default().max_delay_ms);
        assert_eq!(config.write_mode, "optimistic");
    }

    #[test]
    fn retry_budget_counts_rereads() {
        let retry = RetryConfig {
            max_retries: 2,
            ..RetryConfig::default()
        };
        assert!(retry.allows(1));
        assert!(retry.allows(2));
        assert!(!retry.allows(3));

        let no_retry = RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        };
        assert!(!no_retry.allows(1));
    }

    #[test]
    fn backoff_doubles_from_base_up_to_cap() {
        let retry = RetryConfig {
            max_retries: 10,
            base_delay_ms: 5,
            max_delay_ms: 30,
        };
        let pauses: Vec<u64> = (1..=5)
            .map(|n| retry.backoff(n).as_millis() as u64)
            .collect();
        assert_eq!(pauses, vec![5, 10, 20, 30, 30]);
        assert_eq!(retry.backoff(500), Duration::from_millis(30));
    }

    #[test]
    fn zero_base_never_sleeps() {
        let retry = RetryConfig {
            max_retries: 10_000,
            base_delay_ms: 0,
            max_delay_ms: 1,
        };
        assert_eq!(retry.backoff(1), Duration::ZERO);
        assert_eq!(retry.backoff(9_999), Duration::ZERO);
    }

    #[test]
    fn write_default_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(!path.exists());

        VaultConfig::write_default_if_missing(&path).unwrap();
        assert!(path.exists());

        let config = VaultConfig::from_file(&path).unwrap();
        assert_eq!(config.write_mode, "optimistic");
    }

    #[test]
    fn write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(&path, "write_mode = \"overwrite\"\n").unwrap();
        VaultConfig::write_default_if_missing(&path).unwrap();

        let config = VaultConfig::from_file(&path).unwrap();
        assert_eq!(config.write_mode, "overwrite");
    }

    #[test]
    fn from_file_rejects_invalid_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "write_mode = \"turbo\"\n").unwrap();
        assert!(VaultConfig::from_file(&path).is_err());
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(VaultConfig::from_file(&path), Err(Error::IoError(_))));
    }

    #[test]
    fn write_to_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = VaultConfig::overwrite().with_retry(RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        });
        config.write_to_file(&path).unwrap();
        let loaded = VaultConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
