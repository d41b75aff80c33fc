//! Immutable configuration tree built from parsed HOCON.
//!
//! The HOCON text itself is parsed by the [`hocon`] crate (see
//! [`ConfigDocument`]); the result is converted into this module's own
//! [`Config`] tree so that the rest of the crate gets a stable view:
//!
//! - **Leaf enumeration**: [`Config::entries`] yields every leaf with its
//!   fully dotted path. Object nodes are never entries; lists are leaves.
//! - **Fallback**: [`Config::with_fallback`] deep-merges two trees, the
//!   receiver winning on every path where it has a value.
//! - **Typed access**: [`Config::get_string`] and [`Config::get_list`].
//! - **Rendering**: [`Config::render`] as formatted or concise HOCON or JSON.
//! - **Provenance**: every node carries an [`Origin`]; values read from the
//!   process environment report exactly [`SYSTEM_PROPERTIES_ORIGIN`].
//!
//! Configs are values: every operation returns a fresh `Config`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::HoconError;

mod document;
mod flatten;
mod map;
mod merge;
pub mod path;
mod render;
mod scan;

pub use document::ConfigDocument;
pub use render::RenderOptions;

pub(crate) use map::{Conflict, insert_path};

/// Origin description carried by values that come from the process
/// environment. Entries with this origin are never written to a key store.
pub const SYSTEM_PROPERTIES_ORIGIN: &str = "system properties";

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Parsed from a file on disk.
    File(PathBuf),
    /// Parsed from in-memory text with a caller-supplied description.
    Text(String),
    /// Built from a key/value map (see [`Config::parse_map`]).
    Map,
    /// Read from the process environment.
    SystemProperties,
}

impl Origin {
    pub fn description(&self) -> String {
        match self {
            Origin::File(path) => path.display().to_string(),
            Origin::Text(description) => description.clone(),
            Origin::Map => "hardcoded value".to_string(),
            Origin::SystemProperties => SYSTEM_PROPERTIES_ORIGIN.to_string(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Children of an object node, sorted by key.
pub type Object = BTreeMap<String, ConfigValue>;

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    List(Vec<Value>),
    Object(Object),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) | Value::Real(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A value together with its [`Origin`].
///
/// Equality ignores the origin: two configs with the same values are equal
/// no matter which files they were read from.
#[derive(Debug, Clone)]
pub struct ConfigValue {
    value: Value,
    origin: Origin,
}

impl ConfigValue {
    pub fn new(value: Value, origin: Origin) -> Self {
        Self { value, origin }
    }

    pub fn string(value: impl Into<String>, origin: Origin) -> Self {
        Self::new(Value::String(value.into()), origin)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Provenance tag of this value, e.g. a file path or `"system properties"`.
    pub fn origin_description(&self) -> String {
        self.origin.description()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// An immutable configuration tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    root: Object,
}

impl Config {
    /// The empty configuration, identity element for [`with_fallback`](Self::with_fallback).
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_object(root: Object) -> Self {
        Self { root }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn root(&self) -> &Object {
        &self.root
    }

    /// Parse and resolve a HOCON file. An unreadable file is a
    /// [`HoconError::ParseError`] naming the path.
    pub fn parse_file(path: &Path) -> Result<Self, HoconError> {
        let doc = ConfigDocument::from_file(path).map_err(|e| match e {
            HoconError::IoError { path, source } => HoconError::ParseError {
                origin: path.display().to_string(),
                message: source.to_string(),
            },
            other => other,
        })?;
        doc.resolve()
    }

    /// Parse and resolve HOCON text. `description` names the source in
    /// origins and error messages.
    pub fn parse_str(text: &str, description: &str) -> Result<Self, HoconError> {
        ConfigDocument::from_text(text, description).resolve()
    }

    /// Look up the value at a dotted path.
    pub fn get(&self, path: &str) -> Result<&ConfigValue, HoconError> {
        let segments = path::split(path)?;
        let (leaf, parents) = segments
            .split_last()
            .ok_or_else(|| HoconError::KeyNotFound(path.to_string()))?;

        let mut current = &self.root;
        for segment in parents {
            current = match current.get(segment).map(ConfigValue::value) {
                Some(Value::Object(obj)) => obj,
                _ => return Err(HoconError::KeyNotFound(path.to_string())),
            };
        }
        current
            .get(leaf)
            .ok_or_else(|| HoconError::KeyNotFound(path.to_string()))
    }

    /// Whether a non-null value exists at `path`.
    pub fn has_path(&self, path: &str) -> bool {
        matches!(self.get(path), Ok(v) if !matches!(v.value, Value::Null))
    }

    pub fn get_string(&self, path: &str) -> Result<&str, HoconError> {
        let value = self.get(path)?;
        value.as_str().ok_or_else(|| HoconError::WrongType {
            path: path.to_string(),
            expected: "string",
            found: value.value.type_name(),
        })
    }

    /// Read a list whose elements are all strings.
    pub fn get_list(&self, path: &str) -> Result<Vec<String>, HoconError> {
        let value = self.get(path)?;
        let Value::List(items) = &value.value else {
            return Err(HoconError::WrongType {
                path: path.to_string(),
                expected: "list",
                found: value.value.type_name(),
            });
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| HoconError::WrongType {
                        path: format!("{path}[{i}]"),
                        expected: "string",
                        found: item.type_name(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Config {
        Config::parse_str(text, "test").unwrap()
    }

    #[test]
    fn empty_has_no_entries() {
        let config = Config::empty();
        assert!(config.is_empty());
        assert!(config.entries().is_empty());
    }

    #[test]
    fn get_string_nested() {
        let config = parse("mongo { host = \"mongo.cn\" }");
        assert_eq!(config.get_string("mongo.host").unwrap(), "mongo.cn");
    }

    #[test]
    fn get_string_wrong_type() {
        let config = parse("port = 8080");
        match config.get_string("port") {
            Err(HoconError::WrongType {
                expected, found, ..
            }) => {
                assert_eq!(expected, "string");
                assert_eq!(found, "number");
            }
            other => panic!("Expected WrongType, got {other:?}"),
        }
    }

    #[test]
    fn get_missing_key() {
        let config = parse("a = 1");
        assert!(matches!(
            config.get("b.c"),
            Err(HoconError::KeyNotFound(key)) if key == "b.c"
        ));
    }

    #[test]
    fn get_through_scalar_is_missing() {
        let config = parse("a = 1");
        assert!(matches!(config.get("a.b"), Err(HoconError::KeyNotFound(_))));
    }

    #[test]
    fn get_list_of_strings() {
        let config = parse(r#"hierarchy = ["a.conf", "b.conf"]"#);
        assert_eq!(
            config.get_list("hierarchy").unwrap(),
            vec!["a.conf".to_string(), "b.conf".to_string()]
        );
    }

    #[test]
    fn get_list_rejects_non_string_element() {
        let config = parse(r#"hierarchy = ["a.conf", 3]"#);
        match config.get_list("hierarchy") {
            Err(HoconError::WrongType { path, .. }) => assert_eq!(path, "hierarchy[1]"),
            other => panic!("Expected WrongType, got {other:?}"),
        }
    }

    #[test]
    fn get_list_rejects_scalar() {
        let config = parse(r#"hierarchy = "a.conf""#);
        assert!(matches!(
            config.get_list("hierarchy"),
            Err(HoconError::WrongType { expected: "list", .. })
        ));
    }

    #[test]
    fn has_path_ignores_null() {
        let config = parse("a = null\nb = 1");
        assert!(!config.has_path("a"));
        assert!(config.has_path("b"));
        assert!(!config.has_path("c"));
    }

    #[test]
    fn origin_description_for_text() {
        let config = parse("a = x");
        assert_eq!(config.get("a").unwrap().origin_description(), "test");
    }

    #[test]
    fn equality_ignores_origin() {
        let a = ConfigValue::string("x", Origin::Map);
        let b = ConfigValue::string("x", Origin::SystemProperties);
        assert_eq!(a, b);
    }

    #[test]
    fn system_properties_origin_is_literal() {
        assert_eq!(
            Origin::SystemProperties.description(),
            SYSTEM_PROPERTIES_ORIGIN
        );
        assert_eq!(SYSTEM_PROPERTIES_ORIGIN, "system properties");
    }
}
