//! Entry validation run before any bulk write to the key store.
//!
//! Only string values can be stored, and values taken from the process
//! environment must never be: they carry the `"system properties"` origin
//! and would otherwise leak machine state into the store.

use crate::config::{Config, ConfigValue, SYSTEM_PROPERTIES_ORIGIN};
use crate::error::{HoconError, InvalidEntryReason};

/// Check that `value` may be written under `key` and return its text.
pub fn assert_valid_secret<'a>(key: &str, value: &'a ConfigValue) -> Result<&'a str, HoconError> {
    let invalid = |reason| HoconError::InvalidEntryError {
        reason,
        key: key.to_string(),
    };

    if value.origin_description() == SYSTEM_PROPERTIES_ORIGIN {
        return Err(invalid(InvalidEntryReason::SystemProperty));
    }
    value.as_str().ok_or_else(|| {
        invalid(InvalidEntryReason::NonStringValue {
            found: value.value().type_name(),
        })
    })
}

/// Validate every leaf of `config`, failing on the first invalid one.
///
/// Returns `(key, text, origin description)` for each leaf, in key order.
pub fn validate_entries(config: &Config) -> Result<Vec<(String, &str, String)>, HoconError> {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| {
            let text = assert_valid_secret(&key, value)?;
            let origin = value.origin_description();
            Ok((key, text, origin))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Origin;

    #[test]
    fn string_from_file_is_valid() {
        let value = ConfigValue::string("SECRET", Origin::Text("application.conf".into()));
        assert_eq!(assert_valid_secret("k", &value).unwrap(), "SECRET");
    }

    #[test]
    fn system_property_rejected() {
        let value = ConfigValue::string("/home/me", Origin::SystemProperties);
        match assert_valid_secret("user.home", &value) {
            Err(HoconError::InvalidEntryError { reason, key }) => {
                assert_eq!(reason, InvalidEntryReason::SystemProperty);
                assert_eq!(key, "user.home");
            }
            other => panic!("Expected InvalidEntryError, got {other:?}"),
        }
    }

    #[test]
    fn non_string_rejected() {
        let config = Config::parse_str("port = 8080", "test").unwrap();
        match validate_entries(&config) {
            Err(HoconError::InvalidEntryError { reason, key }) => {
                assert_eq!(reason, InvalidEntryReason::NonStringValue { found: "number" });
                assert_eq!(key, "port");
            }
            other => panic!("Expected InvalidEntryError, got {other:?}"),
        }
    }

    #[test]
    fn lists_rejected() {
        let config = Config::parse_str("xs = [a, b]", "test").unwrap();
        assert!(matches!(
            validate_entries(&config),
            Err(HoconError::InvalidEntryError {
                reason: InvalidEntryReason::NonStringValue { found: "list" },
                ..
            })
        ));
    }

    #[test]
    fn all_valid_entries_returned() {
        let config = Config::parse_str("a { x = \"1\", y = \"2\" }", "app.conf").unwrap();
        let entries = validate_entries(&config).unwrap();
        assert_eq!(
            entries,
            vec![
                ("a.x".to_string(), "1", "app.conf".to_string()),
                ("a.y".to_string(), "2", "app.conf".to_string()),
            ]
        );
    }
}
