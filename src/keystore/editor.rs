//! Fluent façade binding configs to key store mutations.

use std::io::{Read, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::HoconError;

use super::redact;
use super::store::SecretStore;
use super::types::KeyStoreType;

/// Owns a [`SecretStore`] and applies config-driven edits to it.
///
/// ```no_run
/// use hocon_keystore::config::Config;
/// use hocon_keystore::keystore::{KeyStoreType, KeystoreEditor};
///
/// let mut editor = KeystoreEditor::open("secrets.jceks".as_ref(), "CHANGEME", KeyStoreType::Jceks)?;
/// editor
///     .upsert_map([("db.password", "hunter2")])?
///     .generate("signing", "HmacSHA256", 2048)?;
/// editor.to("secrets.jceks".as_ref())?;
///
/// let config = Config::parse_file("application.conf".as_ref())?;
/// println!("{}", editor.redact(&config).render(Default::default()));
/// # Ok::<(), hocon_keystore::HoconError>(())
/// ```
#[derive(Debug)]
pub struct KeystoreEditor {
    store: SecretStore,
}

impl KeystoreEditor {
    pub fn with(store: SecretStore) -> Self {
        Self { store }
    }

    /// Edit a new, empty store.
    pub fn create(password: &str, store_type: KeyStoreType) -> Result<Self, HoconError> {
        SecretStore::create(password, store_type).map(Self::with)
    }

    /// Edit an existing store file.
    pub fn open(path: &Path, password: &str, store_type: KeyStoreType) -> Result<Self, HoconError> {
        SecretStore::open(path, password, store_type).map(Self::with)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        password: &str,
        store_type: KeyStoreType,
    ) -> Result<Self, HoconError> {
        SecretStore::from_reader(reader, password, store_type).map(Self::with)
    }

    pub fn redact(&self, config: &Config) -> Config {
        redact::redact(config, &self.store)
    }

    pub fn reveal(&self, config: &Config) -> Result<Config, HoconError> {
        redact::reveal(config, &self.store)
    }

    pub fn upsert(&mut self, config: &Config) -> Result<&mut Self, HoconError> {
        redact::upsert(config, &mut self.store)?;
        Ok(self)
    }

    /// [`upsert`](Self::upsert) from dotted keys to values.
    pub fn upsert_map<I, K, V>(&mut self, map: I) -> Result<&mut Self, HoconError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.upsert(&Config::parse_map(map)?)
    }

    pub fn update(&mut self, config: &Config) -> Result<&mut Self, HoconError> {
        redact::update(config, &mut self.store)?;
        Ok(self)
    }

    /// [`update`](Self::update) from dotted keys to values.
    pub fn update_map<I, K, V>(&mut self, map: I) -> Result<&mut Self, HoconError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.update(&Config::parse_map(map)?)
    }

    /// Store a raw value, bypassing config validation.
    pub fn put(&mut self, key: &str, value: &str) -> &mut Self {
        self.store.put(key, value);
        self
    }

    /// Upsert a single entry with the same rules as the bulk form.
    pub fn put_entry(&mut self, key: &str, value: &str) -> Result<&mut Self, HoconError> {
        self.upsert_map([(key, value)])
    }

    /// Update a single existing entry with the same rules as the bulk form.
    pub fn update_entry(&mut self, key: &str, value: &str) -> Result<&mut Self, HoconError> {
        self.update_map([(key, value)])
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Remove `key`; absent keys are ignored.
    pub fn del(&mut self, key: &str) -> &mut Self {
        if !self.store.delete(key) {
            tracing::debug!(key, "delete of absent key");
        }
        self
    }

    /// Generate a secret key under `alias`. Read it back with
    /// [`get`](Self::get) for its `ENC(...)` form.
    pub fn generate(&mut self, alias: &str, algorithm: &str, bits: u32) -> Result<&mut Self, HoconError> {
        self.store.generate(alias, algorithm, bits)?;
        Ok(self)
    }

    /// Save atomically to `path`.
    pub fn to(&self, path: &Path) -> Result<(), HoconError> {
        self.store.save(path)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), HoconError> {
        self.store.save_to_writer(writer)
    }

    pub fn store(&self) -> &SecretStore {
        &self.store
    }

    pub fn into_store(self) -> SecretStore {
        self.store
    }
}
