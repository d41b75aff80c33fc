//! Build a [`Config`] from flat `(dotted path, string)` pairs.
//!
//! Each `("database.url", "pg://")` pair is expanded into the nested object
//! structure needed for fallback merging with parsed configuration.

use super::{Config, ConfigValue, Object, Origin, Value, path};
use crate::error::HoconError;

/// What to do when one path is both a leaf and the parent of another leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Conflict {
    /// Fail with [`HoconError::PathConflict`].
    Reject,
    /// Keep the object, drop the scalar.
    PreferObject,
    /// The value inserted last wins.
    Overwrite,
}

impl Config {
    /// Build a config from dotted paths to string values.
    ///
    /// `("a.b", "x")` becomes `{ a { b = "x" } }`. Fails with
    /// [`HoconError::PathConflict`] if a path is both a value and the parent
    /// of another value.
    pub fn parse_map<I, K, V>(map: I) -> Result<Config, HoconError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut root = Object::new();
        for (key, value) in map {
            let segments = path::split(key.as_ref())?;
            insert_path(
                &mut root,
                &segments,
                ConfigValue::string(value, Origin::Map),
                Conflict::Reject,
            )?;
        }
        Ok(Config::from_object(root))
    }

    /// Build a config from `(name, value)` pairs as found in the process
    /// environment. Every value reports the `"system properties"` origin.
    ///
    /// Names that are not valid paths are skipped, as are scalars that
    /// collide with an object path (`a=1` alongside `a.b=2`).
    pub fn from_system_properties<I>(vars: I) -> Config
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut root = Object::new();
        for (name, value) in vars {
            let Ok(segments) = path::split(&name) else {
                continue;
            };
            // PreferObject never fails.
            let _ = insert_path(
                &mut root,
                &segments,
                ConfigValue::string(value, Origin::SystemProperties),
                Conflict::PreferObject,
            );
        }
        Config::from_object(root)
    }

    /// The current process environment as a config. See
    /// [`from_system_properties`](Self::from_system_properties).
    pub fn system_properties() -> Config {
        Self::from_system_properties(std::env::vars())
    }
}

/// Insert `leaf` at `segments`, creating intermediate objects.
pub(crate) fn insert_path(
    root: &mut Object,
    segments: &[String],
    leaf: ConfigValue,
    policy: Conflict,
) -> Result<(), HoconError> {
    let conflict = |depth: usize| HoconError::PathConflict {
        path: path::join(&segments[..=depth]),
    };
    let Some((last, parents)) = segments.split_last() else {
        return Err(HoconError::InvalidPath {
            path: String::new(),
            reason: "empty path".into(),
        });
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| ConfigValue::new(Value::Object(Object::new()), leaf.origin.clone()));
        if !matches!(slot.value, Value::Object(_)) {
            if policy == Conflict::Reject {
                return Err(conflict(depth));
            }
            *slot = ConfigValue::new(Value::Object(Object::new()), leaf.origin.clone());
        }
        current = match &mut slot.value {
            Value::Object(obj) => obj,
            _ => return Err(conflict(depth)),
        };
    }

    let displaces_object = matches!(
        current.get(last).map(ConfigValue::value),
        Some(Value::Object(_))
    ) && !matches!(leaf.value, Value::Object(_));

    match policy {
        Conflict::Reject if displaces_object => Err(conflict(parents.len())),
        Conflict::PreferObject if displaces_object => Ok(()),
        _ => {
            current.insert(last.clone(), leaf);
            Ok(())
        }
    }
}
