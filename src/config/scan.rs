//! Token-level scan of HOCON text.
//!
//! The `hocon` crate drops a missing substitution inside a concatenation
//! without reporting it, so references are collected from the source and
//! checked against the resolved tree instead. Quoted strings and comments
//! are skipped; nothing else about the syntax is interpreted.

/// A `${path}` or `${?path}` found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reference {
    /// The path as written, quotes included.
    pub path: String,
    pub optional: bool,
}

/// Every substitution in `text`, in source order.
pub(crate) fn references(text: &str) -> Vec<Reference> {
    let mut found = Vec::new();
    scan(text, |token| {
        if let Token::Reference(reference) = token {
            found.push(reference);
        }
    });
    found
}

/// Whether `text` has an `include` directive.
pub(crate) fn has_include(text: &str) -> bool {
    let mut found = false;
    scan(text, |token| found |= token == Token::Include);
    found
}

#[derive(Debug, PartialEq)]
enum Token {
    Reference(Reference),
    Include,
}

fn scan(text: &str, mut emit: impl FnMut(Token)) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let rest = &text[i..];
        if rest.starts_with("\"\"\"") {
            i += 3 + rest[3..].find("\"\"\"").map_or(rest.len() - 3, |end| end + 3);
        } else if rest.starts_with('"') {
            i += quoted_len(rest);
        } else if rest.starts_with('#') || rest.starts_with("//") {
            i += rest.find('\n').unwrap_or(rest.len());
        } else if rest.starts_with("${") {
            let (len, reference) = substitution(rest);
            if let Some(reference) = reference {
                emit(Token::Reference(reference));
            }
            i += len;
        } else if rest.starts_with("include") && at_word_start(bytes, i) && is_directive(&rest[7..]) {
            emit(Token::Include);
            i += 7;
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
}

/// Length of the quoted string at the start of `s`, closing quote included.
fn quoted_len(s: &str) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return i + 1,
            '\n' => return i,
            _ => {}
        }
    }
    s.len()
}

/// Parse the `${...}` at the start of `s`. Returns the length consumed and
/// the reference, `None` when the braces never close.
fn substitution(s: &str) -> (usize, Option<Reference>) {
    let body_start = 2;
    let mut i = body_start;
    while i < s.len() {
        let rest = &s[i..];
        if rest.starts_with('"') {
            i += quoted_len(rest);
        } else if rest.starts_with('}') {
            let body = s[body_start..i].trim();
            let (optional, path) = match body.strip_prefix('?') {
                Some(path) => (true, path.trim()),
                None => (false, body),
            };
            let reference = Reference {
                path: path.to_string(),
                optional,
            };
            return (i + 1, Some(reference));
        } else if rest.starts_with('\n') {
            break;
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    (i.max(body_start), None)
}

fn at_word_start(bytes: &[u8], i: usize) -> bool {
    i == 0 || !matches!(bytes[i - 1], b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' | b'.')
}

/// `include "x"`, `include required(...)`, `include file(...)` and the like.
fn is_directive(after: &str) -> bool {
    let trimmed = after.trim_start_matches([' ', '\t']);
    if trimmed.len() == after.len() {
        return false;
    }
    trimmed.starts_with('"')
        || ["required(", "file(", "url(", "classpath("]
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(path: &str) -> Reference {
        Reference {
            path: path.into(),
            optional: false,
        }
    }

    fn optional(path: &str) -> Reference {
        Reference {
            path: path.into(),
            optional: true,
        }
    }

    #[test]
    fn finds_references_in_concatenation() {
        assert_eq!(
            references(r#"hierarchy = [ "app/"${app}".conf", "env/"${?env}".conf" ]"#),
            vec![required("app"), optional("env")]
        );
    }

    #[test]
    fn trims_and_keeps_quoted_paths() {
        assert_eq!(
            references(r#"a = ${ db.host }, b = ${? "odd.key".x }"#),
            vec![required("db.host"), optional(r#""odd.key".x"#)]
        );
    }

    #[test]
    fn skips_strings_and_comments() {
        let text = r#"
            a = "${not}"
            b = """multi ${line} "quoted" """
            # ${comment}
            // ${other}
            c = "esc \" ${still.string}"
            d = ${real}
        "#;
        assert_eq!(references(text), vec![required("real")]);
    }

    #[test]
    fn unterminated_reference_is_ignored() {
        assert_eq!(references("a = ${b\nc = ${d}"), vec![required("d")]);
    }

    // --- include ---

    #[test]
    fn detects_include_directives() {
        assert!(has_include("include \"base.conf\"\na = 1"));
        assert!(has_include("a { include required(file(\"x.conf\")) }"));
    }

    #[test]
    fn include_as_a_key_is_not_a_directive() {
        assert!(!has_include("include = yes"));
        assert!(!has_include("includes = [\"x\"]"));
        assert!(!has_include("a = \"include \\\"x\\\"\""));
        assert!(!has_include("# include \"x.conf\""));
    }
}
