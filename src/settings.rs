//! Tool defaults layered from the environment and a settings file.
//!
//! Precedence, highest first: command-line flag, environment variable,
//! `settings.toml` in the platform config directory, built-in default. The
//! flag layer is applied by the caller; this module resolves the rest with
//! confique.

use std::path::{Path, PathBuf};

use confique::Config;

use crate::error::HoconError;

pub const APP_NAME: &str = "hocon-keystore";
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Config, Debug, Clone, PartialEq)]
pub struct ToolSettings {
    /// Algorithm used by `generate` when `--key-alg` is absent.
    #[config(env = "HOCON_KEYSTORE_KEY_ALG", default = "HmacSHA256")]
    pub key_alg: String,

    /// Key size in bits used by `generate` when `--key-size` is absent.
    #[config(env = "HOCON_KEYSTORE_KEY_SIZE", default = 2048)]
    pub key_size: u32,

    /// Store type used when neither `--store-type` nor the file name decide it.
    #[config(env = "HOCON_KEYSTORE_STORE_TYPE")]
    pub store_type: Option<String>,
}

impl ToolSettings {
    /// Environment, then the platform settings file, then defaults.
    pub fn load() -> Result<Self, HoconError> {
        let mut builder = Self::builder().env();
        if let Some(path) = settings_path() {
            tracing::debug!(path = %path.display(), "settings file");
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Only `path` and defaults, ignoring the environment. A missing file
    /// yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, HoconError> {
        Ok(Self::builder().file(path).load()?)
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            key_alg: "HmacSHA256".into(),
            key_size: 2048,
            store_type: None,
        }
    }
}

/// `{config_dir}/settings.toml` for this tool, when the platform has one.
pub fn settings_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Some(dirs.config_dir().join(SETTINGS_FILE))
}
