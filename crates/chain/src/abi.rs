use std::path::Path;

use alloy::json_abi::JsonAbi;
use alloy::primitives::{B256, U256};

use crate::{ChainError, Result};

/// Loads a contract interface description from disk. Accepts both a raw ABI
/// array and a Hardhat-style artifact wrapping it under an `"abi"` field.
pub fn load_abi(path: &Path) -> Result<JsonAbi> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ChainError::Config(format!("cannot read ABI at {}: {e}", path.display()))
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| ChainError::Config(format!("invalid ABI JSON: {e}")))?;
    let abi_value = match value.get("abi") {
        Some(inner) => inner.clone(),
        None => value,
    };
    serde_json::from_value(abi_value)
        .map_err(|e| ChainError::Config(format!("unsupported ABI shape: {e}")))
}

/// Scans receipt log topics for `event` and returns its first indexed uint.
/// A receipt without the expected event is a malformed response, not a
/// silent miss.
pub fn find_event_id<'a>(
    abi: &JsonAbi,
    event: &str,
    topics_per_log: impl IntoIterator<Item = &'a [B256]>,
) -> Result<U256> {
    let selectors: Vec<B256> = abi
        .events
        .get(event)
        .map(|defs| defs.iter().map(|e| e.selector()).collect())
        .unwrap_or_default();
    if selectors.is_empty() {
        return Err(ChainError::Config(format!("ABI defines no {event} event")));
    }

    for topics in topics_per_log {
        let Some(first) = topics.first() else {
            continue;
        };
        if !selectors.contains(first) {
            continue;
        }
        let Some(id) = topics.get(1) else {
            return Err(ChainError::Malformed(format!(
                "{event} event carries no indexed identifier"
            )));
        };
        return Ok(U256::from_be_slice(id.as_slice()));
    }

    Err(ChainError::Malformed(format!(
        "receipt contains no {event} event"
    )))
}
