//! Keystore-backed secrets for HOCON configuration.
//!
//! - [`SecretStore`]: a password-protected map from dotted keys to secrets.
//! - [`redact`](redact::redact) / [`reveal`](redact::reveal): swap secrets
//!   in a config for the `*****` sentinel and back.
//! - [`upsert`](redact::upsert) / [`update`](redact::update): write config
//!   values into the store, all or nothing.
//! - [`KeystoreEditor`]: a fluent façade over the above.

pub mod algorithm;
pub mod editor;
pub mod redact;
pub mod store;
pub mod types;
pub mod validate;

pub use algorithm::{EncodedKey, KeyAlgorithm};
pub use editor::KeystoreEditor;
pub use redact::{REDACTED, is_redacted};
pub use store::{SecretStore, StoreEntry};
pub use types::KeyStoreType;
