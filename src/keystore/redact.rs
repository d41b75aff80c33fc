//! Reconcile config entries with a secret store through the redaction sentinel.
//!
//! A string value starting with [`REDACTED`] stands in for a secret held in
//! the store under the value's full dotted path. `redact` swaps stored
//! secrets for the sentinel, `reveal` swaps sentinels back for the stored
//! secrets, and `upsert`/`update` write config values into the store.
//!
//! The bulk writers validate everything before touching the store: either
//! every entry is written or none is.

use crate::config::{Config, ConfigValue, Conflict, Object, Value, insert_path};
use crate::error::{HoconError, MissingKey};

use super::store::SecretStore;
use super::validate::validate_entries;

/// The redaction sentinel.
pub const REDACTED: &str = "*****";

/// Whether `value` is a redacted string, i.e. starts with the sentinel.
pub fn is_redacted(value: &Value) -> bool {
    value.as_str().is_some_and(is_redacted_str)
}

pub fn is_redacted_str(text: &str) -> bool {
    text.starts_with(REDACTED)
}

/// Replace every value whose key is in the store with the sentinel. Entries
/// absent from the store are unchanged.
pub fn redact(config: &Config, store: &SecretStore) -> Config {
    let mut overlay = Object::new();
    let mut redacted = 0usize;
    for (segments, value) in config.leaves() {
        let key = crate::config::path::join(&segments);
        if store.contains(&key) {
            tracing::debug!(key, "redacting");
            let sentinel = ConfigValue::string(REDACTED, value.origin().clone());
            // Leaves of one config never conflict.
            let _ = insert_path(&mut overlay, &segments, sentinel, Conflict::Overwrite);
            redacted += 1;
        }
    }
    tracing::info!(redacted, "redacted config");
    Config::from_object(overlay).with_fallback(config.clone())
}

/// Replace every redacted value with its secret from the store.
///
/// Fails with [`HoconError::MissingKeyError`] listing every redacted key the
/// store does not hold; nothing is returned in that case.
pub fn reveal(config: &Config, store: &SecretStore) -> Result<Config, HoconError> {
    let mut overlay = Object::new();
    let mut missing = Vec::new();
    for (segments, value) in config.leaves() {
        if !is_redacted(value.value()) {
            continue;
        }
        let key = crate::config::path::join(&segments);
        match store.get(&key) {
            Some(secret) => {
                let revealed = ConfigValue::string(secret, value.origin().clone());
                let _ = insert_path(&mut overlay, &segments, revealed, Conflict::Overwrite);
            }
            None => {
                tracing::warn!(key, "redacted value has no key store entry");
                missing.push(MissingKey::new(key, value.origin_description()));
            }
        }
    }

    if !missing.is_empty() {
        return Err(HoconError::MissingKeyError(missing));
    }
    Ok(Config::from_object(overlay).with_fallback(config.clone()))
}

/// Write every entry of `config` into the store.
///
/// Redacted values leave an existing entry untouched; a redacted value for a
/// key the store lacks is an error. Nothing is written unless every entry is
/// valid.
pub fn upsert(config: &Config, store: &mut SecretStore) -> Result<(), HoconError> {
    let entries = validate_entries(config)?;

    let missing: Vec<MissingKey> = entries
        .iter()
        .filter(|(key, text, _)| is_redacted_str(text) && !store.contains(key))
        .map(|(key, _, origin)| MissingKey::new(key.clone(), origin.clone()))
        .collect();
    if !missing.is_empty() {
        return Err(HoconError::MissingKeyError(missing));
    }

    for (key, text, _) in entries {
        if is_redacted_str(text) {
            tracing::debug!(key, "redacted value, keeping stored entry");
            continue;
        }
        store.put(&key, text);
    }
    Ok(())
}

/// Like [`upsert`], but every key must already exist in the store.
pub fn update(config: &Config, store: &mut SecretStore) -> Result<(), HoconError> {
    let entries = validate_entries(config)?;

    let missing: Vec<MissingKey> = entries
        .iter()
        .filter(|(key, _, _)| !store.contains(key))
        .map(|(key, _, origin)| MissingKey::new(key.clone(), origin.clone()))
        .collect();
    if !missing.is_empty() {
        return Err(HoconError::MissingKeyError(missing));
    }

    for (key, text, _) in entries {
        if is_redacted_str(text) {
            tracing::warn!(key, "skipping redacted value");
            continue;
        }
        store.put(&key, text);
    }
    Ok(())
}
