//! Hiera-style layering of HOCON configuration, and key store backed
//! secrets for those configs.
//!
//! Two halves share one config model ([`config::Config`]):
//!
//! - **Hierarchy resolution** ([`hiera`]): a root directory holds
//!   `hiera.conf`, whose `hierarchy` list names config fragments. Entries may
//!   substitute caller-supplied facts (`"node/"${hostname}".conf"`). The
//!   fragments are merged so that later entries override earlier ones, and
//!   resolved together against the same facts.
//! - **Secret handling** ([`keystore`]): a password-protected store maps
//!   dotted config keys to secrets. A config can be *redacted* (secrets
//!   replaced by the `*****` sentinel), *revealed* (sentinels replaced by the
//!   stored secrets), or used to *upsert*/*update* the store.
//!
//! ```ignore
//! let hiera = Hiera::new("conf");
//! let config = hiera.config_from_facts([("hostname", "web1"), ("env", "prod")])?;
//!
//! let editor = KeystoreEditor::open("secrets.jceks".as_ref(), "CHANGEME", KeyStoreType::Jceks)?;
//! println!("{}", editor.redact(&config).render(RenderOptions::default()));
//! ```
//!
//! # Merge order
//!
//! ```text
//! hierarchy = [ "common.conf", "env/"${env}".conf", "node/"${hostname}".conf" ]
//!                 ↑ overridden by      ↑ overridden by
//! ```
//!
//! A missing fragment contributes nothing and logs a warning. A missing
//! `hiera.conf`, a missing `hierarchy` key, or a fact the description needs
//! but the caller did not supply are errors.
//!
//! # The redaction sentinel
//!
//! Any string value that *starts with* `*****` is redacted; the secret lives
//! in the store under the value's full dotted path. `****` (four stars) is an
//! ordinary value.
//!
//! The bulk writers (`upsert`, `update`) validate every entry first: only
//! strings from config files may be stored, never numbers, lists or values
//! taken from the process environment. Either every entry is written or none
//! is.
//!
//! # Command-line tools
//!
//! With the `clap` feature (on by default) two binaries are built:
//!
//! - `hocon-keystore --keystore <file> --password <pw> <command> <argument>`
//!   edits the store (`get`, `put`, `del`, `generate`, `upsert`, `update`)
//!   and redacts or reveals configs (`redact`, `reveal`).
//! - `hocon-hiera --root <dir> --fact name=value ...` prints a resolved
//!   hierarchy.
//!
//! The command logic itself is clap-free: build a
//! [`KeystoreAction`](types::KeystoreAction) and hand it to
//! [`KeystoreTool::handle`](tool::KeystoreTool::handle).
//!
//! # Errors
//!
//! All fallible operations return [`HoconError`]. See the [`error`] module.

pub mod config;
pub mod error;
pub mod hiera;
pub mod keystore;
pub mod ops;
pub mod persist;
pub mod settings;
pub mod tool;
pub mod types;

#[cfg(feature = "clap")]
pub mod cli;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::{HieraArgs, KeystoreArgs};
pub use config::{Config, ConfigDocument, ConfigValue, Origin, RenderOptions, Value};
pub use error::HoconError;
pub use hiera::Hiera;
pub use keystore::{KeyStoreType, KeystoreEditor, SecretStore};
pub use ops::CommandOutput;
pub use settings::ToolSettings;
pub use tool::KeystoreTool;
pub use types::{KeystoreAction, KeystoreRequest, ToolOptions};
