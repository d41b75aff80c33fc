use super::{Config, ConfigValue, Object, Value};

impl Config {
    /// Layer `fallback` underneath `self`.
    ///
    /// Where both sides hold an object at the same path the two are merged
    /// recursively. Anywhere else the value from `self` wins, and paths only
    /// `fallback` defines are kept.
    pub fn with_fallback(self, fallback: Config) -> Config {
        Config::from_object(deep_merge(fallback.root, self.root))
    }
}

/// Deep-merge `overlay` on top of `base`.
/// If both sides have an object for the same key, recurse.
/// Otherwise, `overlay`'s value wins.
pub(crate) fn deep_merge(mut base: Object, overlay: Object) -> Object {
    for (key, overlay_val) in overlay {
        match (base.remove(&key), overlay_val) {
            (
                Some(ConfigValue {
                    value: Value::Object(base_obj),
                    ..
                }),
                ConfigValue {
                    value: Value::Object(overlay_obj),
                    origin,
                },
            ) => {
                let merged = Value::Object(deep_merge(base_obj, overlay_obj));
                base.insert(key, ConfigValue::new(merged, origin));
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Origin;

    fn config(text: &str) -> Config {
        Config::parse_str(text, "test").unwrap()
    }

    #[test]
    fn disjoint_keys_merge() {
        let merged = config(r#"host = "localhost""#).with_fallback(config("port = 3000"));
        assert_eq!(merged.get_string("host").unwrap(), "localhost");
        assert_eq!(merged.get("port").unwrap().value(), &Value::Integer(3000));
    }

    #[test]
    fn receiver_wins_on_same_scalar() {
        let merged = config("port = 3000").with_fallback(config("port = 8080"));
        assert_eq!(merged.get("port").unwrap().value(), &Value::Integer(3000));
    }

    #[test]
    fn nested_objects_recurse() {
        let merged = config("database { pool_size = 20 }").with_fallback(config(
            r#"database { url = "postgres://old", pool_size = 5 }"#,
        ));
        assert_eq!(merged.get_string("database.url").unwrap(), "postgres://old");
        assert_eq!(
            merged.get("database.pool_size").unwrap().value(),
            &Value::Integer(20)
        );
    }

    #[test]
    fn receiver_scalar_replaces_fallback_object() {
        let merged = config(r#"database = "flat_string""#)
            .with_fallback(config(r#"database { url = "x" }"#));
        assert_eq!(merged.get_string("database").unwrap(), "flat_string");
    }

    #[test]
    fn lists_are_replaced_not_merged() {
        let merged = config("xs = [1]").with_fallback(config("xs = [2, 3]"));
        assert_eq!(
            merged.get("xs").unwrap().value(),
            &Value::List(vec![Value::Integer(1)])
        );
    }

    #[test]
    fn empty_is_identity_on_both_sides() {
        let c = config("a { b = 1 }\nc = x");
        assert_eq!(c.clone().with_fallback(Config::empty()), c);
        assert_eq!(Config::empty().with_fallback(c.clone()), c);
    }

    #[test]
    fn fallback_is_associative() {
        let a = config("k = a\nonly_a = 1");
        let b = config("k = b\nnested { x = b }");
        let c = config("k = c\nnested { x = c, y = c }");
        let left = a.clone().with_fallback(b.clone()).with_fallback(c.clone());
        let right = a.with_fallback(b.with_fallback(c));
        assert_eq!(left, right);
    }

    #[test]
    fn winning_value_keeps_its_origin() {
        let top = Config::parse_str("a = top", "top.conf").unwrap();
        let bottom = Config::parse_str("a = bottom\nb = bottom", "bottom.conf").unwrap();
        let merged = top.with_fallback(bottom);
        assert_eq!(merged.get("a").unwrap().origin(), &Origin::Text("top.conf".into()));
        assert_eq!(
            merged.get("b").unwrap().origin(),
            &Origin::Text("bottom.conf".into())
        );
    }
}
