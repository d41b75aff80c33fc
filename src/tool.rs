//! Runs [`KeystoreAction`]s against a key store file.
//!
//! [`KeystoreTool`] is the clap-free entry point behind the
//! `hocon-keystore` binary: it settles the store type, opens (or creates)
//! the store, applies one action, and saves the store when the action
//! changed it.

use std::path::Path;

use crate::config::{Config, RenderOptions};
use crate::error::HoconError;
use crate::keystore::{KeyStoreType, KeystoreEditor};
use crate::ops::CommandOutput;
use crate::persist;
use crate::settings::ToolSettings;
use crate::types::{KeystoreAction, ToolOptions};

#[derive(Debug, Clone)]
pub struct KeystoreTool {
    options: ToolOptions,
    settings: ToolSettings,
}

impl KeystoreTool {
    pub fn new(options: ToolOptions, settings: ToolSettings) -> Self {
        Self { options, settings }
    }

    pub fn options(&self) -> &ToolOptions {
        &self.options
    }

    /// The store type to open with.
    ///
    /// An explicit `--store-type` wins, with a warning when the file name
    /// suggests another type. Otherwise the file name decides, then the
    /// settings, then JCEKS.
    pub fn store_type(&self) -> Result<KeyStoreType, HoconError> {
        let inferred = KeyStoreType::from_filename(&self.options.keystore);
        if let Some(explicit) = self.options.store_type {
            if inferred.is_known() && inferred != explicit {
                tracing::warn!(%explicit, %inferred, "store type does not match key store file name");
            }
            return Ok(explicit);
        }
        if inferred.is_known() {
            return Ok(inferred);
        }
        match &self.settings.store_type {
            Some(name) => name.parse(),
            None => Ok(KeyStoreType::DEFAULT),
        }
    }

    /// Open the key store, or start an empty one under `--create` when the
    /// file does not exist yet.
    pub fn open_editor(&self) -> Result<KeystoreEditor, HoconError> {
        let store_type = self.store_type()?;
        let path = &self.options.keystore;
        if self.options.create && !path.exists() {
            tracing::info!(path = %path.display(), %store_type, "creating key store");
            return KeystoreEditor::create(&self.options.password, store_type);
        }
        KeystoreEditor::open(path, &self.options.password, store_type)
    }

    /// Run one action. Mutating actions save the store before returning.
    pub fn handle(&self, action: &KeystoreAction) -> Result<CommandOutput, HoconError> {
        let mut editor = self.open_editor()?;

        let output = match action {
            KeystoreAction::Get { key } => CommandOutput::Value(editor.get(key)),
            KeystoreAction::Put { key, value } => {
                editor.put(key, value);
                CommandOutput::Stored { key: key.clone() }
            }
            KeystoreAction::Del { key } => {
                editor.del(key);
                CommandOutput::Deleted { key: key.clone() }
            }
            KeystoreAction::Generate {
                alias,
                algorithm,
                bits,
            } => {
                let algorithm = algorithm.clone().unwrap_or_else(|| self.settings.key_alg.clone());
                let bits = bits.unwrap_or(self.settings.key_size);
                editor.generate(alias, &algorithm, bits)?;
                let encoded = editor
                    .get(alias)
                    .ok_or_else(|| HoconError::KeyNotFound(alias.clone()))?;
                CommandOutput::Generated {
                    alias: alias.clone(),
                    algorithm,
                    bits,
                    encoded,
                }
            }
            KeystoreAction::Upsert { config } => {
                let config = Config::parse_file(config)?;
                editor.upsert(&config)?;
                CommandOutput::Written {
                    count: config.entries().len(),
                }
            }
            KeystoreAction::Update { config } => {
                let config = Config::parse_file(config)?;
                editor.update(&config)?;
                CommandOutput::Written {
                    count: config.entries().len(),
                }
            }
            KeystoreAction::Redact { config: path } => {
                let redacted = editor.redact(&Config::parse_file(path)?);
                self.emit(&redacted, path)?
            }
            KeystoreAction::Reveal { config: path } => {
                let revealed = editor.reveal(&Config::parse_file(path)?)?;
                self.emit(&revealed, path)?
            }
        };

        if action.mutates_store() {
            editor.to(&self.options.keystore)?;
        }
        Ok(output)
    }

    /// Handle an action and print its output to stdout.
    pub fn handle_and_print(&self, action: &KeystoreAction) -> Result<(), HoconError> {
        let output = self.handle(action)?;
        print!("{output}");
        Ok(())
    }

    fn emit(&self, config: &Config, source: &Path) -> Result<CommandOutput, HoconError> {
        let text = config.render(RenderOptions::for_output(self.options.json));
        if self.options.replace_config {
            persist::write_atomic(source, text.as_bytes())?;
            return Ok(CommandOutput::ConfigReplaced {
                path: source.to_path_buf(),
            });
        }
        Ok(CommandOutput::Rendered(text))
    }
}
