//! Unresolved HOCON documents and their conversion into [`Config`].
//!
//! Parsing is delegated to [`hocon::HoconLoader`] with environment
//! substitution disabled, so a document resolves the same way regardless of
//! the process it runs in. Facts are made visible to `${name}` substitutions
//! by loading them underneath the documents.
//!
//! Syntax is checked strictly, but resolution runs in the loader's lenient
//! mode: a missing `${?name}` leaves a placeholder that is dropped here,
//! while every required `${name}` in the source is checked against the
//! resolved tree, including those inside a concatenation.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use hocon::{Hocon, HoconLoader};

use super::scan;
use super::{Config, ConfigValue, Object, Origin, RenderOptions, Value, path};
use crate::error::HoconError;

/// HOCON source that has been read but not yet resolved.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    origin: Origin,
    text: String,
}

impl ConfigDocument {
    /// Read a document from disk. A read failure is a [`HoconError::IoError`].
    pub fn from_file(path: &Path) -> Result<Self, HoconError> {
        let text = fs::read_to_string(path).map_err(|e| HoconError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            origin: Origin::File(path.to_path_buf()),
            text,
        })
    }

    /// Wrap in-memory text. `description` is used as the origin of every value.
    pub fn from_text(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            origin: Origin::Text(description.into()),
            text: text.into(),
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Resolve self-references only.
    pub fn resolve(&self) -> Result<Config, HoconError> {
        self.resolve_with(&Config::empty())
    }

    /// Resolve with `facts` available to `${name}` substitutions.
    ///
    /// Facts are not part of the result unless the document itself declares
    /// the same top-level key.
    pub fn resolve_with(&self, facts: &Config) -> Result<Config, HoconError> {
        Self::resolve_layers(std::slice::from_ref(self), facts)
    }

    /// Resolve a stack of documents as one config, lowest priority first.
    ///
    /// Objects merge and later documents override earlier ones, as with
    /// [`Config::with_fallback`], but substitution happens once over the
    /// merged tree: a `${path}` in any document sees the keys of every
    /// document and of `facts`. Each value's origin is the highest document
    /// that sets it.
    pub fn resolve_layers(docs: &[ConfigDocument], facts: &Config) -> Result<Config, HoconError> {
        let docs: Vec<&ConfigDocument> = docs.iter().filter(|doc| !doc.is_blank()).collect();
        let Some(&top) = docs.last() else {
            return Ok(Config::empty());
        };

        let mut loader = HoconLoader::new().no_system();
        if !facts.is_empty() {
            let facts_json = facts.render(RenderOptions::concise_json());
            loader = loader
                .load_str(&facts_json)
                .map_err(|e| HoconError::ParseError {
                    origin: Origin::Map.description(),
                    message: e.to_string(),
                })?;
        }
        for doc in &docs {
            doc.check_syntax()?;
            loader = doc.load_into(loader).map_err(|e| doc.map_error(e))?;
        }
        let merged = loader.hocon().map_err(|e| top.map_error(e))?;

        for doc in &docs {
            doc.check_references(&merged)?;
        }

        let layers = Layers::parse(&docs, top);
        let mut root = match merged {
            Hocon::Hash(map) => layers.convert_object(map, &mut Vec::new())?,
            Hocon::Null => Object::new(),
            other => {
                return Err(HoconError::ParseError {
                    origin: top.origin.description(),
                    message: format!("document root must be an object, found {other:?}"),
                });
            }
        };

        if !facts.is_empty() {
            let declared = layers.declared_roots();
            root.retain(|key, _| declared.contains(key) || !facts.root().contains_key(key));
        }
        Ok(Config::from_object(root))
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Feed the document to `loader`.
    ///
    /// Files with `include` directives are loaded by path so includes resolve
    /// relative to them. Everything else goes in as text without trailing
    /// whitespace, which the parser rejects after the last newline.
    fn load_into(&self, loader: HoconLoader) -> Result<HoconLoader, hocon::Error> {
        match &self.origin {
            Origin::File(path) if scan::has_include(&self.text) => loader.load_file(path),
            _ => loader.load_str(self.text.trim_end()),
        }
    }

    /// The lenient loader keeps whatever prefix of the text it could parse,
    /// so the syntax is checked strictly first.
    fn check_syntax(&self) -> Result<(), HoconError> {
        self.load_into(HoconLoader::new().no_system().strict())
            .map(drop)
            .map_err(|e| self.map_error(e))
    }

    /// Every required `${path}` must name a value in the resolved tree.
    fn check_references(&self, resolved: &Hocon) -> Result<(), HoconError> {
        for reference in scan::references(&self.text) {
            if reference.optional {
                continue;
            }
            let Ok(segments) = path::split(&reference.path) else {
                continue;
            };
            match lookup(resolved, &segments) {
                Some(Hocon::BadValue(_)) | None => {
                    return Err(HoconError::UnresolvedSubstitution {
                        name: reference.path,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn map_error(&self, err: hocon::Error) -> HoconError {
        match err {
            hocon::Error::KeyNotFound { key, .. } => HoconError::UnresolvedSubstitution { name: key },
            other => HoconError::ParseError {
                origin: self.origin.description(),
                message: other.to_string(),
            },
        }
    }
}

/// Each document parsed on its own, without the others underneath. Used to
/// tell which document a merged value came from.
struct Layers<'a> {
    parsed: Vec<(&'a ConfigDocument, Option<Hocon>)>,
    top: &'a ConfigDocument,
}

impl<'a> Layers<'a> {
    fn parse(docs: &[&'a ConfigDocument], top: &'a ConfigDocument) -> Self {
        let parsed = docs
            .iter()
            .map(|doc| {
                let tree = doc
                    .load_into(HoconLoader::new().no_system())
                    .and_then(HoconLoader::hocon)
                    .ok();
                (*doc, tree)
            })
            .collect();
        Self { parsed, top }
    }

    /// Top-level keys the documents define themselves. Read from the
    /// separate parses so that unresolved substitutions do not hide them.
    fn declared_roots(&self) -> BTreeSet<String> {
        self.parsed
            .iter()
            .filter_map(|(_, tree)| match tree {
                Some(Hocon::Hash(map)) => Some(map.keys().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// The highest document that sets `path`, or the top one when none
    /// does on its own.
    fn owner(&self, path: &[String]) -> &'a ConfigDocument {
        self.parsed
            .iter()
            .rev()
            .find(|(_, tree)| tree.as_ref().is_some_and(|tree| lookup(tree, path).is_some()))
            .map_or(self.top, |(doc, _)| *doc)
    }

    fn convert_object(
        &self,
        map: impl IntoIterator<Item = (String, Hocon)>,
        at: &mut Vec<String>,
    ) -> Result<Object, HoconError> {
        let mut object = Object::new();
        for (key, node) in map {
            at.push(key.clone());
            let converted = self.convert(node, at);
            let origin = self.owner(at).origin.clone();
            at.pop();
            if let Some(value) = converted? {
                object.insert(key, ConfigValue::new(value, origin));
            }
        }
        Ok(object)
    }

    /// `None` for a missing `${?path}`, which removes the field or element.
    fn convert(&self, node: Hocon, at: &mut Vec<String>) -> Result<Option<Value>, HoconError> {
        Ok(Some(match node {
            Hocon::Null => Value::Null,
            Hocon::Boolean(b) => Value::Boolean(b),
            Hocon::Integer(i) => Value::Integer(i),
            Hocon::Real(f) => Value::Real(f),
            Hocon::String(s) => Value::String(s),
            Hocon::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(value) = self.convert(item, at)? {
                        list.push(value);
                    }
                }
                Value::List(list)
            }
            Hocon::Hash(map) => Value::Object(self.convert_object(map, at)?),
            Hocon::BadValue(hocon::Error::KeyNotFound { .. }) => return Ok(None),
            Hocon::BadValue(err) => return Err(self.owner(at).map_error(err)),
        }))
    }
}

/// The node at `path`, where a numeric segment also indexes a list.
fn lookup<'h>(node: &'h Hocon, path: &[String]) -> Option<&'h Hocon> {
    path.iter().try_fold(node, |node, segment| match node {
        Hocon::Hash(map) => map.get(segment),
        Hocon::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
