use std::path::{Path, PathBuf};

use crate::error::HoconError;
use crate::keystore::KeyStoreType;

/// Process exit codes of the `hocon-keystore` binary.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    /// Bad flags, an unknown command or a malformed argument.
    pub const OPTIONS_ERROR: u8 = 3;
    pub const WRONG_NUMBER_OF_ARGUMENTS: u8 = 4;
    pub const UNHANDLED_EXCEPTION: u8 = 4;
}

/// The exit code a failed invocation reports.
pub fn exit_code_for(err: &HoconError) -> u8 {
    match err {
        e if e.is_usage_error() => exit_code::OPTIONS_ERROR,
        HoconError::WrongArgumentCount { .. } => exit_code::WRONG_NUMBER_OF_ARGUMENTS,
        _ => exit_code::UNHANDLED_EXCEPTION,
    }
}

/// A key store command, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum KeystoreAction {
    Get { key: String },
    Put { key: String, value: String },
    Del { key: String },
    Generate {
        alias: String,
        algorithm: Option<String>,
        bits: Option<u32>,
    },
    Upsert { config: PathBuf },
    Update { config: PathBuf },
    Redact { config: PathBuf },
    Reveal { config: PathBuf },
}

impl KeystoreAction {
    /// Build an action from the `<command> <argument>` pair.
    ///
    /// `put` takes `key=value`, split at the first `=`. Command names are
    /// case-sensitive.
    pub fn parse(command: &str, argument: &str) -> Result<Self, HoconError> {
        let key = argument.to_string();
        let config = PathBuf::from(argument);
        Ok(match command {
            "get" => Self::Get { key },
            "put" => {
                let (key, value) = argument.split_once('=').ok_or_else(|| {
                    HoconError::ArgumentError(format!(
                        "put expects <key>=<value>, got '{argument}'"
                    ))
                })?;
                Self::Put {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "del" => Self::Del { key },
            "generate" => Self::Generate {
                alias: key,
                algorithm: None,
                bits: None,
            },
            "upsert" => Self::Upsert { config },
            "update" => Self::Update { config },
            "redact" => Self::Redact { config },
            "reveal" => Self::Reveal { config },
            other => return Err(HoconError::UnknownCommand(other.to_string())),
        })
    }

    /// Whether the store must be saved after this action succeeds.
    pub fn mutates_store(&self) -> bool {
        matches!(
            self,
            Self::Put { .. }
                | Self::Del { .. }
                | Self::Generate { .. }
                | Self::Upsert { .. }
                | Self::Update { .. }
        )
    }

    /// The config file a config-driven action reads.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Self::Upsert { config }
            | Self::Update { config }
            | Self::Redact { config }
            | Self::Reveal { config } => Some(config),
            _ => None,
        }
    }
}

/// Store and output options shared by every action.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOptions {
    pub keystore: PathBuf,
    pub password: String,
    /// Explicit `--store-type`; inferred from the file name when absent.
    pub store_type: Option<KeyStoreType>,
    /// Start an empty store when the file does not exist.
    pub create: bool,
    /// Write `redact`/`reveal` output back over the input config.
    pub replace_config: bool,
    pub json: bool,
}

/// One complete invocation: options plus the action to run.
#[derive(Debug, Clone, PartialEq)]
pub struct KeystoreRequest {
    pub options: ToolOptions,
    pub action: KeystoreAction,
}
