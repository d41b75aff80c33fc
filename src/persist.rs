//! Atomic file replacement.
//!
//! Content is written to a temporary file in the target's own directory,
//! synced, then renamed over the target. Readers see either the old file or
//! the complete new one; a failure at any step leaves the target untouched.
//! Creates parent directories as needed. A replaced file keeps its
//! permissions; a new one gets the temporary file's owner-only mode.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::HoconError;

/// Replace `path` with `content` atomically.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), HoconError> {
    let io_err = |p: &Path| {
        let p = p.to_path_buf();
        move |e: std::io::Error| HoconError::IoError { path: p, source: e }
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err(dir))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err(dir))?;
    tmp.write_all(content).map_err(io_err(tmp.path()))?;
    if let Some(existing) = std::fs::metadata(path).ok().filter(|m| m.is_file()) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(io_err(tmp.path()))?;
    }
    tmp.as_file().sync_all().map_err(io_err(tmp.path()))?;

    // Same directory, so the rename never crosses a filesystem boundary.
    tmp.persist(path).map_err(|e| HoconError::IoError {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");
    Ok(())
}
