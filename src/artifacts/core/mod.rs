//! Tree copy helpers shared by the staging area, the snapshot store and the
//! working tree
//!
//! All copies are merge-copies: entries under the destination that the
//! source does not mention are left alone, entries it does mention are
//! overwritten.

use crate::artifacts::errors::{IoContext, Result, WitError};
use std::path::Path;
use walkdir::WalkDir;

/// Copy the file or directory tree at `from` onto `to`
///
/// Entries named in `ignored` are skipped at every depth.
pub fn copy_into(from: &Path, to: &Path, ignored: &[&str]) -> Result<()> {
    if !from.exists() {
        return Err(WitError::PathNotFound(from.to_path_buf()));
    }

    if !from.is_dir() {
        return copy_file(from, to);
    }

    let entries = WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !ignored
                    .iter()
                    .any(|ignored| entry.file_name() == std::ffi::OsStr::new(ignored))
        });

    for entry in entries {
        let entry = entry.map_err(|err| WitError::Io {
            path: err.path().unwrap_or(from).to_path_buf(),
            source: err.into(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| WitError::PathOutsideRepository {
                path: entry.path().to_path_buf(),
                root: from.to_path_buf(),
            })?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            if target.is_file() {
                std::fs::remove_file(&target).at(&target)?;
            }
            std::fs::create_dir_all(&target).at(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    Ok(())
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if to.is_dir() {
        std::fs::remove_dir_all(to).at(to)?;
    }
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).at(parent)?;
    }

    std::fs::copy(from, to).at(from)?;

    Ok(())
}

/// Remove everything under `dir`, leaving `dir` itself in place
pub fn clear_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).at(dir)?;
    }
    std::fs::create_dir_all(dir).at(dir)?;

    Ok(())
}
