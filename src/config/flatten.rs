//! Leaf enumeration over a [`Config`] tree.

use super::{Config, ConfigValue, Object, Value, path};

impl Config {
    /// Every leaf as `(dotted path, value)`, in key order.
    ///
    /// Objects are recursed into and never appear themselves; lists are
    /// leaves. `null` values are not entries.
    pub fn entries(&self) -> Vec<(String, &ConfigValue)> {
        self.leaves()
            .into_iter()
            .map(|(segments, value)| (path::join(&segments), value))
            .collect()
    }

    /// Like [`entries`](Self::entries) but with the path still split into
    /// segments.
    pub(crate) fn leaves(&self) -> Vec<(Vec<String>, &ConfigValue)> {
        let mut out = Vec::new();
        collect(&self.root, &mut Vec::new(), &mut out);
        out
    }
}

fn collect<'a>(
    obj: &'a Object,
    prefix: &mut Vec<String>,
    out: &mut Vec<(Vec<String>, &'a ConfigValue)>,
) {
    for (key, node) in obj {
        prefix.push(key.clone());
        match node.value() {
            Value::Null => {}
            Value::Object(children) => collect(children, prefix, out),
            _ => out.push((prefix.clone(), node)),
        }
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(text: &str) -> Vec<String> {
        Config::parse_str(text, "test")
            .unwrap()
            .entries()
            .into_iter()
            .map(|(k, _)| k)
            .collect()
    }

    #[test]
    fn flat_and_nested_leaves() {
        assert_eq!(
            keys("host = x\ndatabase { url = y, pool { size = 5 } }"),
            vec!["database.pool.size", "database.url", "host"]
        );
    }

    #[test]
    fn objects_are_not_entries() {
        let k = keys("a { b = 1 }");
        assert!(!k.contains(&"a".to_string()));
    }

    #[test]
    fn empty_object_has_no_entries() {
        assert!(keys("a {}").is_empty());
    }

    #[test]
    fn lists_are_leaves() {
        assert_eq!(keys("xs = [1, 2]\nys = [{ a = 1 }]"), vec!["xs", "ys"]);
    }

    #[test]
    fn nulls_are_skipped() {
        assert_eq!(keys("a = null\nb = 1"), vec!["b"]);
    }

    #[test]
    fn special_segments_are_quoted() {
        assert_eq!(
            keys(r#"api { "openai.com" = k }"#),
            vec![r#"api."openai.com""#]
        );
    }
}
