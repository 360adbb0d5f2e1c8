//! Flat key command handlers.

use serde_json::Value;
use watchvault_core::validate_key;
use watchvault_engine::Vault;

use crate::convert::convert_result;
use crate::{Error, Output, Result};

fn check_key(key: &str) -> Result<()> {
    validate_key(key).map_err(|e| Error::InvalidKey {
        reason: match e {
            watchvault_core::Error::InvalidInput(reason) => reason,
            other => other.to_string(),
        },
    })
}

/// Handle DataPut command.
pub fn data_put(vault: &Vault, key: String, value: Value) -> Result<Output> {
    check_key(&key)?;
    let version = convert_result(vault.flat().put(&key, &value))?;
    Ok(Output::Version(version))
}

/// Handle DataGet command.
pub fn data_get(vault: &Vault, key: String) -> Result<Output> {
    check_key(&key)?;
    let value = convert_result(vault.flat().get(&key))?;
    Ok(Output::Value(value))
}

/// Handle Keys command.
pub fn keys(vault: &Vault) -> Result<Output> {
    Ok(Output::Keys(convert_result(vault.flat().keys())?))
}
