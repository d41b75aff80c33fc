//! Password-protected secret store.
//!
//! The store is held in memory as a sorted map of entries and persisted as a
//! single encrypted blob: a JSON envelope (format, version, store type,
//! entries) encrypted with the store password using age's passphrase
//! recipient. The file format is opaque to callers; only the entries and
//! the store type are observable.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use age::secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::algorithm::{EncodedKey, KeyAlgorithm};
use super::types::KeyStoreType;
use crate::error::{HoconError, StoreOpenCause};
use crate::persist;

const FORMAT: &str = "hocon-keystore";
const VERSION: u32 = 1;

/// A stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreEntry {
    /// A cleartext string secret.
    Secret { value: String },
    /// Raw secret key material.
    Key {
        algorithm: KeyAlgorithm,
        #[serde(with = "b64")]
        material: Vec<u8>,
    },
}

impl StoreEntry {
    /// The entry as text: the secret itself, or the `ENC(...)` marker for keys.
    pub fn to_text(&self) -> String {
        match self {
            StoreEntry::Secret { value } => value.clone(),
            StoreEntry::Key {
                algorithm,
                material,
            } => EncodedKey {
                algorithm: *algorithm,
                material: material.clone(),
            }
            .to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    store_type: KeyStoreType,
    entries: BTreeMap<String, StoreEntry>,
}

mod b64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(d)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}

/// An in-memory secret store, opened from or saved to a file.
pub struct SecretStore {
    store_type: KeyStoreType,
    password: SecretString,
    entries: BTreeMap<String, StoreEntry>,
}

impl fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretStore")
            .field("store_type", &self.store_type)
            .field("aliases", &self.aliases())
            .finish_non_exhaustive()
    }
}

impl SecretStore {
    /// A new, empty store.
    pub fn create(password: &str, store_type: KeyStoreType) -> Result<Self, HoconError> {
        if !store_type.is_known() {
            return Err(HoconError::UnknownStoreType(store_type.to_string()));
        }
        Ok(Self {
            store_type,
            password: SecretString::new(password.to_string()),
            entries: BTreeMap::new(),
        })
    }

    /// Load an existing store file.
    pub fn open(path: &Path, password: &str, store_type: KeyStoreType) -> Result<Self, HoconError> {
        let open_err = |cause| HoconError::StoreOpenError {
            path: path.to_path_buf(),
            cause,
        };
        if !store_type.is_known() {
            return Err(open_err(StoreOpenCause::UnknownType));
        }

        let bytes = fs::read(path).map_err(|e| open_err(StoreOpenCause::Io(e)))?;
        let store = Self::decode(&bytes, password, store_type).map_err(open_err)?;
        tracing::debug!(path = %path.display(), entries = store.len(), "opened key store");
        Ok(store)
    }

    /// Load a store from a stream.
    pub fn from_reader<R: Read>(
        mut reader: R,
        password: &str,
        store_type: KeyStoreType,
    ) -> Result<Self, HoconError> {
        let open_err = |cause| HoconError::StoreOpenError {
            path: PathBuf::from("<stream>"),
            cause,
        };
        if !store_type.is_known() {
            return Err(open_err(StoreOpenCause::UnknownType));
        }

        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| open_err(StoreOpenCause::Io(e)))?;
        Self::decode(&bytes, password, store_type).map_err(open_err)
    }

    fn decode(
        bytes: &[u8],
        password: &str,
        store_type: KeyStoreType,
    ) -> Result<Self, StoreOpenCause> {
        let password = SecretString::new(password.to_string());

        let decryptor = match age::Decryptor::new(bytes)
            .map_err(|e| StoreOpenCause::Corrupt(e.to_string()))?
        {
            age::Decryptor::Passphrase(d) => d,
            _ => {
                return Err(StoreOpenCause::Corrupt(
                    "not a password-protected store".into(),
                ));
            }
        };

        let mut plaintext = Vec::new();
        let mut reader = decryptor
            .decrypt(&password, None)
            .map_err(|_| StoreOpenCause::WrongPassword)?;
        reader
            .read_to_end(&mut plaintext)
            .map_err(|e| StoreOpenCause::Corrupt(e.to_string()))?;

        let envelope: Envelope = serde_json::from_slice(&plaintext)
            .map_err(|e| StoreOpenCause::Corrupt(e.to_string()))?;
        if envelope.format != FORMAT || envelope.version != VERSION {
            return Err(StoreOpenCause::Corrupt(format!(
                "unsupported format {} v{}",
                envelope.format, envelope.version
            )));
        }
        if envelope.store_type != store_type {
            return Err(StoreOpenCause::TypeMismatch {
                expected: store_type.to_string(),
                found: envelope.store_type.to_string(),
            });
        }

        Ok(Self {
            store_type,
            password,
            entries: envelope.entries,
        })
    }

    fn encode(&self) -> Result<Vec<u8>, HoconError> {
        let write_err = |e: &dyn fmt::Display| HoconError::StoreWriteError(e.to_string());

        let envelope = Envelope {
            format: FORMAT.to_string(),
            version: VERSION,
            store_type: self.store_type,
            entries: self.entries.clone(),
        };
        let plaintext = serde_json::to_vec(&envelope).map_err(|e| write_err(&e))?;

        let encryptor = age::Encryptor::with_user_passphrase(SecretString::new(
            self.password.expose_secret().clone(),
        ));
        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| write_err(&e))?;
        writer.write_all(&plaintext).map_err(|e| write_err(&e))?;
        writer.finish().map_err(|e| write_err(&e))?;
        Ok(encrypted)
    }

    /// Write the store to `path`, atomically replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), HoconError> {
        let bytes = self.encode()?;
        persist::write_atomic(path, &bytes)?;
        tracing::info!(path = %path.display(), entries = self.len(), "saved key store");
        Ok(())
    }

    /// Serialise the store to a stream. Not atomic.
    pub fn save_to_writer<W: Write>(&self, mut writer: W) -> Result<(), HoconError> {
        let bytes = self.encode()?;
        writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| HoconError::StoreWriteError(e.to_string()))
    }

    pub fn store_type(&self) -> KeyStoreType {
        self.store_type
    }

    /// Store `secret` under `key`, replacing any previous entry. A value in
    /// canonical `ENC(<algorithm>:<base64>)` form is stored as a secret key
    /// entry. Any other text, including a non-canonical spelling of that
    /// form, is stored verbatim so [`get`](Self::get) returns it unchanged.
    pub fn put(&mut self, key: &str, secret: &str) {
        let entry = match EncodedKey::parse_canonical(secret) {
            Some(encoded) => StoreEntry::Key {
                algorithm: encoded.algorithm,
                material: encoded.material,
            },
            None => StoreEntry::Secret {
                value: secret.to_string(),
            },
        };
        self.entries.insert(key.to_string(), entry);
    }

    /// The entry's text, or `None` if there is no such key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(StoreEntry::to_text)
    }

    pub fn entry(&self, key: &str) -> Option<&StoreEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`. Returns whether it was present; removing an absent key
    /// is a no-op.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Generate a random secret key, store it under `alias` and return its
    /// `ENC(<algorithm>:<base64>)` form.
    pub fn generate(&mut self, alias: &str, algorithm: &str, bits: u32) -> Result<String, HoconError> {
        let algorithm: KeyAlgorithm = algorithm.parse()?;
        let material = algorithm.generate(bits)?;
        let entry = StoreEntry::Key {
            algorithm,
            material,
        };
        let encoded = entry.to_text();
        self.entries.insert(alias.to_string(), entry);
        tracing::debug!(alias, %algorithm, bits, "generated secret key");
        Ok(encoded)
    }

    /// Entry names in sorted order.
    pub fn aliases(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
