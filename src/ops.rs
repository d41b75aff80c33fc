//! Result of a key store command, returned to the caller for display.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// `get`: the stored value, or nothing for an absent key.
    Value(Option<String>),
    /// A rendered config.
    Rendered(String),
    /// Confirmation that a rendered config replaced its source file.
    ConfigReplaced { path: PathBuf },
    Stored { key: String },
    Deleted { key: String },
    /// `generate`: the new key and its `ENC(...)` form.
    Generated {
        alias: String,
        algorithm: String,
        bits: u32,
        encoded: String,
    },
    /// `upsert`/`update`: number of entries considered.
    Written { count: usize },
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Value(value) => writeln!(f, "{}", value.as_deref().unwrap_or("")),
            CommandOutput::Rendered(text) => write!(f, "{text}"),
            CommandOutput::ConfigReplaced { path } => {
                writeln!(f, "Config written to {}", path.display())
            }
            CommandOutput::Stored { key } => writeln!(f, "Stored {key}"),
            CommandOutput::Deleted { key } => writeln!(f, "Deleted {key}"),
            CommandOutput::Generated {
                alias,
                algorithm,
                bits,
                encoded,
            } => {
                writeln!(f, "Generated {bits}-bit {algorithm} key {alias}")?;
                writeln!(f, "{encoded}")
            }
            CommandOutput::Written { count } => writeln!(f, "Wrote {count} entries"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_prints_line() {
        assert_eq!(CommandOutput::Value(Some("SECRET".into())).to_string(), "SECRET\n");
    }

    #[test]
    fn absent_value_prints_empty_line() {
        assert_eq!(CommandOutput::Value(None).to_string(), "\n");
    }

    #[test]
    fn rendered_is_verbatim() {
        assert_eq!(CommandOutput::Rendered("a = 1\n".into()).to_string(), "a = 1\n");
    }

    #[test]
    fn confirmations_do_not_echo_secrets() {
        let out = CommandOutput::Stored { key: "db.password".into() }.to_string();
        assert_eq!(out, "Stored db.password\n");
    }

    #[test]
    fn generate_prints_encoded_key() {
        let out = CommandOutput::Generated {
            alias: "k".into(),
            algorithm: "AES".into(),
            bits: 128,
            encoded: "ENC(AES:AAEC/w==)".into(),
        }
        .to_string();
        assert_eq!(out, "Generated 128-bit AES key k\nENC(AES:AAEC/w==)\n");
    }
}
