use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HoconError;

/// Key store flavour. Only the three named types can be opened or created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyStoreType {
    Unknown,
    Jks,
    Jceks,
    Pkcs12,
}

impl KeyStoreType {
    /// Type used when neither a flag nor the file name says otherwise.
    pub const DEFAULT: KeyStoreType = KeyStoreType::Jceks;

    /// Infer the type from the file extension, case-insensitively:
    /// `.jks`, `.jceks`, `.p12` / `.pfx`. Anything else is `Unknown`.
    pub fn from_filename(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jks") => KeyStoreType::Jks,
            Some("jceks") => KeyStoreType::Jceks,
            Some("p12") | Some("pfx") => KeyStoreType::Pkcs12,
            _ => KeyStoreType::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyStoreType::Unknown => "UNKNOWN",
            KeyStoreType::Jks => "JKS",
            KeyStoreType::Jceks => "JCEKS",
            KeyStoreType::Pkcs12 => "PKCS12",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != KeyStoreType::Unknown
    }
}

impl fmt::Display for KeyStoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyStoreType {
    type Err = HoconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "JKS" => Ok(KeyStoreType::Jks),
            "JCEKS" => Ok(KeyStoreType::Jceks),
            "PKCS12" => Ok(KeyStoreType::Pkcs12),
            _ => Err(HoconError::UnknownStoreType(s.to_string())),
        }
    }
}
