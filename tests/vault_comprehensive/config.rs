//! Opening a vault from `watchvault.toml`.

use std::sync::Arc;
use tempfile::TempDir;
use watchvault::{MemoryBackend, RetryConfig, Vault, VaultConfig, WriteMode};

#[test]
fn first_open_writes_default_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchvault.toml");

    let vault = Vault::open_with_config_file(Arc::new(MemoryBackend::new()), &path).unwrap();
    assert_eq!(vault.config().write_mode().unwrap(), WriteMode::Optimistic);

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("write_mode = \"optimistic\""));
}

#[test]
fn edited_config_is_honored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchvault.toml");
    VaultConfig::overwrite()
        .with_retry(RetryConfig {
            max_retries: 2,
            ..RetryConfig::default()
        })
        .write_to_file(&path)
        .unwrap();

    let vault = Vault::open_with_config_file(Arc::new(MemoryBackend::new()), &path).unwrap();
    assert_eq!(vault.config().write_mode().unwrap(), WriteMode::Overwrite);
    assert_eq!(vault.config().retry.max_retries, 2);
}

#[test]
fn bad_config_refuses_to_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchvault.toml");
    std::fs::write(&path, "write_mode = \"whatever\"\n").unwrap();
    assert!(Vault::open_with_config_file(Arc::new(MemoryBackend::new()), &path).is_err());

    std::fs::write(&path, "write_mode = [").unwrap();
    assert!(Vault::open_with_config_file(Arc::new(MemoryBackend::new()), &path).is_err());
}
