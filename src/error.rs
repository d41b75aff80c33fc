use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HoconError {
    #[error("Failed to parse {origin}: {message}")]
    ParseError { origin: String, message: String },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Hierarchy description not found at {path}")]
    HierarchyMissing { path: PathBuf },

    #[error("Key 'hierarchy' missing from hierarchy description {path}")]
    HierarchyKeyMissing { path: PathBuf },

    #[error("Could not resolve substitution '${{{name}}}'")]
    UnresolvedSubstitution { name: String },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Wrong type for '{path}': expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Path '{path}' occurs both as a value and as the parent of another value")]
    PathConflict { path: String },

    #[error("Could not open key store {path}: {cause}")]
    StoreOpenError { path: PathBuf, cause: StoreOpenCause },

    #[error("Could not write key store: {0}")]
    StoreWriteError(String),

    #[error("Unsupported key store type '{0}', expected one of JKS, JCEKS or PKCS12")]
    UnknownStoreType(String),

    #[error("Secret key algorithm '{algorithm}' unavailable: {reason}")]
    AlgorithmUnavailable { algorithm: String, reason: String },

    #[error("{}", MissingKeysDisplay(.0))]
    MissingKeyError(Vec<MissingKey>),

    #[error("{}", .reason.describe(.key))]
    InvalidEntryError {
        reason: InvalidEntryReason,
        key: String,
    },

    #[error("Invalid argument: {0}")]
    ArgumentError(String),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Expected {expected} positional arguments (<command> <argument>), found {found}")]
    WrongArgumentCount { expected: usize, found: usize },

    #[error("Settings error: {0}")]
    SettingsError(#[from] confique::Error),
}

impl HoconError {
    /// Errors caused by how the tool was invoked rather than by what it found.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            HoconError::ArgumentError(_) | HoconError::UnknownCommand(_)
        )
    }
}

/// Why a key store could not be opened.
#[derive(Debug, Error)]
pub enum StoreOpenCause {
    #[error("wrong password")]
    WrongPassword,

    #[error("unknown store type")]
    UnknownType,

    #[error(transparent)]
    Io(std::io::Error),

    #[error("corrupt store ({0})")]
    Corrupt(String),

    #[error("store is of type {found}, expected {expected}")]
    TypeMismatch { expected: String, found: String },
}

/// A key expected in the store but absent, with the origin of the config
/// value that referenced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKey {
    pub key: String,
    pub origin: String,
}

impl MissingKey {
    pub fn new(key: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            origin: origin.into(),
        }
    }
}

struct MissingKeysDisplay<'a>(&'a [MissingKey]);

impl fmt::Display for MissingKeysDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not find one or more entries in the key store:")?;
        for missing in self.0 {
            write!(f, "\n - '{}' key from {}", missing.key, missing.origin)?;
        }
        Ok(())
    }
}

/// Why a config entry may not be written to the key store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEntryReason {
    /// The value was sourced from the process environment.
    SystemProperty,
    /// Only string values can be stored.
    NonStringValue { found: &'static str },
}

impl InvalidEntryReason {
    fn describe(&self, key: &str) -> String {
        match self {
            InvalidEntryReason::SystemProperty => format!(
                "System properties are not valid key store entries; found system property '{key}'"
            ),
            InvalidEntryReason::NonStringValue { found } => {
                format!("Only string values supported, found {found} value for key '{key}'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_lists_every_key_with_origin() {
        let err = HoconError::MissingKeyError(vec![
            MissingKey::new("Config.Secret", "application.conf"),
            MissingKey::new("Config.Redacted", "application.conf"),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("Could not find one or more entries in the key store:"));
        assert!(msg.contains("\n - 'Config.Secret' key from application.conf"));
        assert!(msg.contains("\n - 'Config.Redacted' key from application.conf"));
    }

    #[test]
    fn unresolved_substitution_formats() {
        let err = HoconError::UnresolvedSubstitution {
            name: "hostname".into(),
        };
        assert_eq!(err.to_string(), "Could not resolve substitution '${hostname}'");
    }

    #[test]
    fn system_property_entry_names_key() {
        let err = HoconError::InvalidEntryError {
            reason: InvalidEntryReason::SystemProperty,
            key: "user.home".into(),
        };
        assert!(err.to_string().contains("'user.home'"));
        assert!(err.to_string().contains("System properties"));
    }

    #[test]
    fn non_string_entry_names_type() {
        let err = HoconError::InvalidEntryError {
            reason: InvalidEntryReason::NonStringValue { found: "number" },
            key: "port".into(),
        };
        assert!(err.to_string().contains("number value for key 'port'"));
    }

    #[test]
    fn store_open_error_includes_cause() {
        let err = HoconError::StoreOpenError {
            path: "secrets.jceks".into(),
            cause: StoreOpenCause::WrongPassword,
        };
        let msg = err.to_string();
        assert!(msg.contains("secrets.jceks"));
        assert!(msg.contains("wrong password"));
    }

    #[test]
    fn usage_errors_are_classified() {
        assert!(HoconError::ArgumentError("x".into()).is_usage_error());
        assert!(HoconError::UnknownCommand("frob".into()).is_usage_error());
        assert!(!HoconError::KeyNotFound("x".into()).is_usage_error());
        assert!(
            !HoconError::WrongArgumentCount {
                expected: 2,
                found: 1
            }
            .is_usage_error()
        );
    }
}
