//! Dotted configuration paths.
//!
//! A path is a sequence of key segments joined by `.`. A segment that is
//! empty or contains anything beyond letters, digits, `-` and `_` is written
//! as a JSON-style quoted string, so `api."openai.com".token` names three
//! segments while `servers.1.password` and `flags.-v` need no quotes.

use crate::error::HoconError;

/// Split a dotted path into its segments, unquoting quoted ones.
pub fn split(path: &str) -> Result<Vec<String>, HoconError> {
    let invalid = |reason: &str| HoconError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if current.is_empty() && !quoted {
                    return Err(invalid("empty segment"));
                }
                segments.push(std::mem::take(&mut current));
                quoted = false;
            }
            '"' => {
                quoted = true;
                loop {
                    match chars.next() {
                        None => return Err(invalid("unterminated quoted segment")),
                        Some('"') => break,
                        Some('\\') => current.push(unescape(&mut chars).ok_or_else(|| invalid("bad escape"))?),
                        Some(other) => current.push(other),
                    }
                }
            }
            other => current.push(other),
        }
    }

    if current.is_empty() && !quoted {
        return Err(invalid("empty segment"));
    }
    segments.push(current);
    Ok(segments)
}

fn unescape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    Some(match chars.next()? {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => {
            let hex: String = chars.by_ref().take(4).collect();
            if hex.len() != 4 {
                return None;
            }
            char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?
        }
        _ => return None,
    })
}

/// Join segments into a dotted path, quoting where needed.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| render_key(s.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}

/// Render a single key segment, quoted only when it has to be.
pub fn render_key(segment: &str) -> String {
    if needs_quotes(segment) {
        quote(segment)
    } else {
        segment.to_string()
    }
}

/// Render a key segment as a field name in HOCON text.
///
/// Stricter than [`render_key`]: a field name that starts with a digit or
/// `-` is quoted too, so it can never read back as a number.
pub(crate) fn render_field_key(segment: &str) -> String {
    match segment.chars().next() {
        Some(first) if !(first.is_alphabetic() || first == '_') => quote(segment),
        _ => render_key(segment),
    }
}

fn needs_quotes(segment: &str) -> bool {
    segment.is_empty() || !segment.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// JSON string literal for `s`, valid in both HOCON and JSON output.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
