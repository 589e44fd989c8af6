//! Filesystem helpers shared across modules.
//!
//! These helpers attach consistent error context (operation + path) to IO
//! failures.

use std::io::Write;
use std::path::Path;

use crate::{Error, Result};

/// Convert an IO error into an application error with operation + path context.
pub fn io_error(op: &'static str, path: &Path, source: std::io::Error) -> Error {
    Error::io_path(op, path, source)
}

/// Ensure a directory exists, creating it (recursively) if needed.
pub fn ensure_dir_all_sync_with_op(op: &'static str, path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| io_error(op, path, e))
}

/// Check that files can be created inside `dir`.
///
/// Creates a temporary file and removes it again.
pub fn probe_writable(dir: &Path) -> Result<()> {
    let probe = tempfile::Builder::new()
        .prefix(".live-vcr-probe")
        .tempfile_in(dir)
        .map_err(|e| io_error("probing write access to", dir, e))?;
    probe
        .close()
        .map_err(|e| io_error("removing write probe in", dir, e))
}

/// Replace `path` with `contents` via a temporary sibling file and a rename.
///
/// Readers either see the previous file or the complete new one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| io_error("creating temporary file in", dir, e))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| io_error("writing temporary file for", path, e))?;
    tmp.persist(path)
        .map_err(|e| io_error("replacing", path, e.error))?;
    Ok(())
}
