//! Clap adapter for the command-line tools.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The bridge
//! to the core is [`KeystoreArgs::into_request()`], which turns parsed
//! arguments into a framework-agnostic
//! [`KeystoreRequest`](crate::types::KeystoreRequest). From there all logic
//! flows through [`KeystoreTool::handle()`](crate::tool::KeystoreTool::handle).

use std::path::PathBuf;

use clap::Parser;

use crate::error::HoconError;
use crate::keystore::KeyStoreType;
use crate::types::{KeystoreAction, KeystoreRequest, ToolOptions};

/// Edit a key store and redact or reveal secrets in HOCON configs.
///
/// Commands: get <key>, put <key>=<value>, del <key>, generate <alias>,
/// upsert <file>, update <file>, redact <file>, reveal <file>.
#[derive(Debug, Parser)]
#[command(name = "hocon-keystore", version)]
pub struct KeystoreArgs {
    /// Key store file.
    #[arg(long)]
    pub keystore: PathBuf,

    /// Key store password.
    #[arg(long)]
    pub password: String,

    /// JKS, JCEKS or PKCS12. Inferred from the key store file name when absent.
    #[arg(long = "store-type", value_parser = parse_store_type)]
    pub store_type: Option<KeyStoreType>,

    /// Start an empty key store if the file does not exist.
    #[arg(long)]
    pub create: bool,

    /// Overwrite the input config with the redact/reveal output.
    #[arg(long = "replace-config")]
    pub replace_config: bool,

    /// Render redact/reveal output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Algorithm for `generate` (AES, HmacSHA1 ... HmacSHA512).
    #[arg(long = "key-alg")]
    pub key_alg: Option<String>,

    /// Key size in bits for `generate`.
    #[arg(long = "key-size")]
    pub key_size: Option<u32>,

    /// <command> <argument>
    #[arg(value_name = "ARGS")]
    pub positionals: Vec<String>,
}

fn parse_store_type(s: &str) -> Result<KeyStoreType, String> {
    s.parse().map_err(|e: HoconError| e.to_string())
}

impl KeystoreArgs {
    /// Convert clap-parsed args into a framework-agnostic request.
    ///
    /// Exactly two positionals are required. `--key-alg` and `--key-size`
    /// are threaded into `generate` only.
    pub fn into_request(self) -> Result<KeystoreRequest, HoconError> {
        let found = self.positionals.len();
        let [command, argument]: [String; 2] = self
            .positionals
            .try_into()
            .map_err(|_| HoconError::WrongArgumentCount { expected: 2, found })?;

        let mut action = KeystoreAction::parse(&command, &argument)?;
        if let KeystoreAction::Generate {
            algorithm, bits, ..
        } = &mut action
        {
            *algorithm = self.key_alg;
            *bits = self.key_size;
        }

        Ok(KeystoreRequest {
            options: ToolOptions {
                keystore: self.keystore,
                password: self.password,
                store_type: self.store_type,
                create: self.create,
                replace_config: self.replace_config,
                json: self.json,
            },
            action,
        })
    }
}

/// Resolve a hiera-style HOCON hierarchy and print the merged config.
#[derive(Debug, Parser)]
#[command(name = "hocon-hiera", version)]
pub struct HieraArgs {
    /// Directory holding `hiera.conf` and the fragments it names.
    #[arg(long)]
    pub root: PathBuf,

    /// A fact for hierarchy substitution; repeatable.
    #[arg(long = "fact", value_name = "NAME=VALUE", value_parser = parse_fact)]
    pub facts: Vec<(String, String)>,

    /// Render as JSON instead of HOCON.
    #[arg(long)]
    pub json: bool,
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn parse_fact(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    if name.is_empty() {
        return Err(format!("empty fact name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}
