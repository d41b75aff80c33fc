//! Text rendering of a [`Config`] as HOCON or JSON.

use std::fmt::Write as _;

use super::{Config, ConfigValue, Object, Value, path};

const INDENT: &str = "    ";

/// Rendering toggles.
///
/// `comments` asks for source comments to be carried through. The parser
/// does not retain them, so the flag only matters for callers that want to
/// express intent; `--json` turns it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub formatted: bool,
    pub json: bool,
    pub origin_comments: bool,
    pub comments: bool,
}

impl Default for RenderOptions {
    /// Formatted HOCON with comments and without origin annotations.
    fn default() -> Self {
        Self {
            formatted: true,
            json: false,
            origin_comments: false,
            comments: true,
        }
    }
}

impl RenderOptions {
    /// The options the command-line tools use: default HOCON, or strict
    /// JSON without comments.
    pub fn for_output(json: bool) -> Self {
        Self {
            json,
            comments: !json,
            ..Self::default()
        }
    }

    /// Single-line JSON, used to feed values back into the parser.
    pub fn concise_json() -> Self {
        Self {
            formatted: false,
            json: true,
            origin_comments: false,
            comments: false,
        }
    }
}

impl Config {
    /// Render as text. The output parses back to an equal `Config`.
    pub fn render(&self, options: RenderOptions) -> String {
        if options.json {
            let json = object_to_json(&self.root);
            return if options.formatted {
                format!("{json:#}\n")
            } else {
                json.to_string()
            };
        }

        let mut out = String::new();
        if options.formatted {
            write_fields(&mut out, &self.root, 0, options.origin_comments);
        } else {
            write_compact_object(&mut out, &self.root);
            out.push('\n');
        }
        out
    }
}

// --- JSON ---

fn object_to_json(obj: &Object) -> serde_json::Value {
    serde_json::Value::Object(
        obj.iter()
            .map(|(key, node)| (key.clone(), value_to_json(node.value())))
            .collect(),
    )
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Object(obj) => object_to_json(obj),
    }
}

// --- HOCON ---

fn write_fields(out: &mut String, obj: &Object, depth: usize, origin_comments: bool) {
    let indent = INDENT.repeat(depth);
    for (key, node) in obj {
        if origin_comments {
            let _ = writeln!(out, "{indent}# {}", node.origin_description());
        }
        let key = path::render_field_key(key);
        match node.value() {
            Value::Object(children) if children.is_empty() => {
                let _ = writeln!(out, "{indent}{key} {{}}");
            }
            Value::Object(children) => {
                let _ = writeln!(out, "{indent}{key} {{");
                write_fields(out, children, depth + 1, origin_comments);
                let _ = writeln!(out, "{indent}}}");
            }
            other => {
                let _ = writeln!(out, "{indent}{key} = {}", inline(other));
            }
        }
    }
}

fn write_compact_object(out: &mut String, obj: &Object) {
    out.push('{');
    for (i, (key, node)) in obj.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&path::render_field_key(key));
        out.push('=');
        write_compact(out, node);
    }
    out.push('}');
}

fn write_compact(out: &mut String, node: &ConfigValue) {
    match node.value() {
        Value::Object(children) => write_compact_object(out, children),
        other => out.push_str(&inline(other)),
    }
}

/// A value on a single line.
fn inline(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) if f.is_finite() => format!("{f:?}"),
        Value::Real(_) => "null".to_string(),
        Value::String(s) => path::quote(s),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(inline).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(obj) => {
            let mut out = String::new();
            write_compact_object(&mut out, obj);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Config {
        Config::parse_str(text, "test").unwrap()
    }

    const SAMPLE: &str = r#"
        Config {
            Secret = "*****"
            "odd.key" = "a \"quoted\" value"
            port = 8080
            ratio = 0.25
            enabled = false
            tags = ["x", "y"]
            empty {}
        }
    "#;

    #[test]
    fn hocon_formatted_layout() {
        let rendered = parse("a { b = \"x\" }\nc = 1").render(RenderOptions::default());
        assert_eq!(rendered, "a {\n    b = \"x\"\n}\nc = 1\n");
    }

    #[test]
    fn hocon_formatted_reparses_equal() {
        let config = parse(SAMPLE);
        let rendered = config.render(RenderOptions::default());
        assert_eq!(parse(&rendered), config);
    }

    #[test]
    fn hocon_concise_reparses_equal() {
        let config = parse(SAMPLE);
        let options = RenderOptions {
            formatted: false,
            ..RenderOptions::default()
        };
        assert_eq!(parse(&config.render(options)), config);
    }

    #[test]
    fn json_is_strict_json() {
        let config = parse(SAMPLE);
        let rendered = config.render(RenderOptions::for_output(true));
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["Config"]["Secret"], "*****");
        assert_eq!(json["Config"]["port"], 8080);
        assert_eq!(json["Config"]["tags"][1], "y");
    }

    #[test]
    fn json_reparses_equal() {
        let config = parse(SAMPLE);
        assert_eq!(parse(&config.render(RenderOptions::for_output(true))), config);
        assert_eq!(parse(&config.render(RenderOptions::concise_json())), config);
    }

    #[test]
    fn origin_comments_precede_fields() {
        let config = Config::parse_str("a = 1", "application.conf").unwrap();
        let options = RenderOptions {
            origin_comments: true,
            ..RenderOptions::default()
        };
        assert_eq!(config.render(options), "# application.conf\na = 1\n");
    }

    #[test]
    fn default_has_no_origin_comments() {
        let rendered = parse("a = 1").render(RenderOptions::default());
        assert!(!rendered.contains('#'));
    }

    #[test]
    fn cli_json_disables_comments() {
        let options = RenderOptions::for_output(true);
        assert!(options.json);
        assert!(!options.comments);
        assert!(RenderOptions::for_output(false).comments);
    }
}
