//! Core resolution pipeline: fold hierarchy layers into one config.
//!
//! Operates on pre-loaded documents (`ResolveInput`) with no I/O, making the
//! fold testable with synthetic inputs. Steps:
//!
//! 1. Resolve the hierarchy description against the facts
//! 2. Read `hierarchy` as the ordered list of fragment paths
//! 3. Stack the loaded fragments so that later ones override earlier ones
//!    (missing ones contribute nothing)
//! 4. Resolve the stack once against the facts, so a fragment may refer to
//!    keys set by any other fragment

use std::path::PathBuf;

use crate::config::{Config, ConfigDocument};
use crate::error::HoconError;

use super::HIERARCHY_KEY;

/// All pre-loaded data needed to fold a hierarchy. No I/O happens here.
pub struct ResolveInput {
    /// Fragments in hierarchy order: first = lowest priority, last = highest.
    /// `None` marks a fragment that does not exist.
    pub fragments: Vec<(PathBuf, Option<ConfigDocument>)>,
    /// Facts available to `${name}` substitutions inside fragments.
    pub facts: Config,
}

/// Resolve the hierarchy description and read its fragment list.
///
/// `source` names the description in [`HoconError::HierarchyKeyMissing`].
pub fn hierarchy_paths(
    description: &ConfigDocument,
    facts: &Config,
    source: PathBuf,
) -> Result<Vec<String>, HoconError> {
    let resolved = description.resolve_with(facts)?;
    match resolved.get_list(HIERARCHY_KEY) {
        Err(HoconError::KeyNotFound(_)) => Err(HoconError::HierarchyKeyMissing { path: source }),
        other => other,
    }
}

/// Stack loaded fragments into the effective config.
///
/// `effective = h[n-1].with_fallback(... h[1].with_fallback(h[0]))`, with
/// substitutions resolved over the whole stack rather than per fragment.
pub fn resolve(input: ResolveInput) -> Result<Config, HoconError> {
    let docs: Vec<ConfigDocument> = input
        .fragments
        .into_iter()
        .filter_map(|(_, doc)| doc)
        .collect();
    ConfigDocument::resolve_layers(&docs, &input.facts)
}

/// Fold already resolved configs. Later layers override earlier ones.
pub fn fold(layers: impl IntoIterator<Item = Config>) -> Config {
    layers
        .into_iter()
        .fold(Config::empty(), |acc, layer| layer.with_fallback(acc))
}
