//! Filesystem side of hierarchy resolution.
//!
//! Reads the hierarchy description and each fragment named by it. A fragment
//! that does not exist is not an error: it is logged and reported as `None`,
//! and the resolver leaves it out of the stack. Paths that came out of
//! substitution with an empty piece (`node//x.conf`, `node/.conf`) are
//! treated the same way. Only actual I/O errors (permissions, etc.) are
//! propagated.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::ConfigDocument;
use crate::error::HoconError;

/// Read the hierarchy description at `path`.
pub fn load_description(path: &Path) -> Result<ConfigDocument, HoconError> {
    match ConfigDocument::from_file(path) {
        Err(HoconError::IoError { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Err(HoconError::HierarchyMissing {
                path: path.to_path_buf(),
            })
        }
        other => other,
    }
}

/// Read one fragment, relative to `root`. `Ok(None)` when it does not exist.
pub fn load_fragment(root: &Path, relative: &str) -> Result<Option<ConfigDocument>, HoconError> {
    if is_degenerate(relative) {
        tracing::warn!(fragment = relative, "fragment path has an empty segment, skipping");
        return Ok(None);
    }

    let path = root.join(relative);
    match ConfigDocument::from_file(&path) {
        Ok(doc) => {
            tracing::debug!(path = %path.display(), "loaded hierarchy fragment");
            Ok(Some(doc))
        }
        Err(HoconError::IoError { source, .. }) if source.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "hierarchy fragment not found, using empty config");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Read every fragment in hierarchy order.
pub fn load_fragments(
    root: &Path,
    hierarchy: &[String],
) -> Result<Vec<(PathBuf, Option<ConfigDocument>)>, HoconError> {
    hierarchy
        .iter()
        .map(|relative| Ok((root.join(relative), load_fragment(root, relative)?)))
        .collect()
}

/// A path with an empty segment, or whose file name is nothing but an
/// extension, is what an empty fact substitutes to.
fn is_degenerate(relative: &str) -> bool {
    let mut segments = relative.split('/');
    let Some(file_name) = segments.next_back() else {
        return true;
    };
    if segments.any(str::is_empty) || file_name.is_empty() {
        return true;
    }
    file_name.starts_with('.') && file_name.matches('.').count() == 1
}
