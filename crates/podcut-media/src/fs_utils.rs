//! Filesystem utilities for publishing output files.
//!
//! Edited audio is written to a temporary file next to its destination and
//! then renamed into place, so a failed edit never leaves a partial output.

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::MediaResult;

/// Create the parent directory of `path` if it does not exist.
pub async fn ensure_parent(path: &Path) -> MediaResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Directory a temporary sibling of `path` should live in.
pub fn staging_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
