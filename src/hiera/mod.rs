//! Hiera-style hierarchical configuration.
//!
//! A root directory holds a hierarchy description, `hiera.conf`, whose
//! `hierarchy` key lists fragment files relative to the root. Entries may
//! interpolate facts:
//!
//! ```text
//! hierarchy = [
//!   "app/"${groupId}".conf",
//!   "env/"${env}".conf",
//!   "node/"${hostname}".conf"
//! ]
//! ```
//!
//! Resolving against a set of facts produces a concrete file list; the
//! fragments are loaded and stacked so that **later entries override earlier
//! ones**, then resolved together: a fragment may use `${path}` for a key set
//! in any other fragment. Fragments that do not exist contribute an empty
//! config and a warning, so layers are optional. A fact that may be absent
//! is written `${?name}`; it leaves an empty piece, which names no layer.
//!
//! ```no_run
//! use hocon_keystore::hiera::Hiera;
//!
//! let config = Hiera::new("conf").config_from_facts([("app", "ecom"), ("node", "server-1")])?;
//! println!("{}", config.get_string("some-param")?);
//! # Ok::<(), hocon_keystore::HoconError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigDocument};
use crate::error::HoconError;

pub mod load;
pub mod resolve;

/// File name of the hierarchy description inside the root directory.
pub const HIERA_CONFIG_FILE: &str = "hiera.conf";

/// Key in the hierarchy description holding the fragment list.
pub const HIERARCHY_KEY: &str = "hierarchy";

/// A hierarchy rooted at a directory.
#[derive(Debug, Clone)]
pub struct Hiera {
    root: PathBuf,
}

impl Hiera {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn description_path(&self) -> PathBuf {
        self.root.join(HIERA_CONFIG_FILE)
    }

    /// The unresolved hierarchy description.
    pub fn description(&self) -> Result<ConfigDocument, HoconError> {
        load::load_description(&self.description_path())
    }

    /// The fragment paths, relative to the root, for `facts`.
    pub fn hierarchy(&self, facts: &Config) -> Result<Vec<String>, HoconError> {
        resolve::hierarchy_paths(&self.description()?, facts, self.description_path())
    }

    /// A single fragment resolved against `facts`, empty when it does not exist.
    pub fn fragment(&self, relative: &str, facts: &Config) -> Result<Config, HoconError> {
        match load::load_fragment(&self.root, relative)? {
            Some(doc) => doc.resolve_with(facts),
            None => Ok(Config::empty()),
        }
    }

    /// The effective configuration for `facts`.
    pub fn config(&self, facts: &Config) -> Result<Config, HoconError> {
        let hierarchy = self.hierarchy(facts)?;
        tracing::debug!(root = %self.root.display(), ?hierarchy, "resolved hierarchy");

        let fragments = load::load_fragments(&self.root, &hierarchy)?;
        resolve::resolve(resolve::ResolveInput {
            fragments,
            facts: facts.clone(),
        })
    }

    /// Like [`config`](Self::config), taking facts as name/value pairs.
    pub fn config_from_facts<I, K, V>(&self, facts: I) -> Result<Config, HoconError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.config(&Config::parse_map(facts)?)
    }
}
