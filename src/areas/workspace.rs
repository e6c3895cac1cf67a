use crate::artifacts::compare::{DeepComparePolicy, deep_compare, files_equal};
use crate::artifacts::core::copy_into;
use crate::artifacts::errors::{IoContext, Result, WitError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Canonical form of `target` relative to the working tree root
    ///
    /// The root itself maps to the empty path.
    pub fn relative_path(&self, target: &Path) -> Result<(PathBuf, PathBuf)> {
        if !target.exists() {
            return Err(WitError::PathNotFound(target.to_path_buf()));
        }

        let absolute = target.canonicalize().at(target)?;
        let relative = absolute
            .strip_prefix(&self.path)
            .map_err(|_| WitError::PathOutsideRepository {
                path: absolute.clone(),
                root: self.path.to_path_buf(),
            })?
            .to_path_buf();

        Ok((absolute, relative))
    }

    /// Merge-copy a snapshot over the working tree
    ///
    /// Files the snapshot does not contain are left in place.
    pub fn restore_from(&self, snapshot: &Path, ignored: &[&str]) -> Result<()> {
        copy_into(snapshot, &self.path, ignored)
    }

    /// Merge-copy one path of a snapshot into the working tree
    pub fn restore_path(&self, snapshot: &Path, relative: &Path) -> Result<()> {
        copy_into(&snapshot.join(relative), &self.path.join(relative), &[])
    }

    /// Paths under `relative` where restoring `snapshot` would replace
    /// untracked work
    ///
    /// A conflict is a kind mismatch: the snapshot holds a file where the
    /// working tree has a directory, or the reverse. The replaced entry is
    /// safe only when `staging` holds the same kind with the same content.
    pub fn overwrite_conflicts(
        &self,
        snapshot: &Path,
        staging: &Path,
        relative: &Path,
        ignored: &[&str],
    ) -> Result<Vec<PathBuf>> {
        let start = snapshot.join(relative);
        if !start.exists() {
            return Ok(Vec::new());
        }

        let entries = WalkDir::new(&start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !ignored
                        .iter()
                        .any(|ignored| entry.file_name() == OsStr::new(ignored))
            });

        let mut conflicts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| WitError::Io {
                path: err.path().unwrap_or(&start).to_path_buf(),
                source: err.into(),
            })?;
            let path = match entry.path().strip_prefix(&start) {
                Ok(inner) if !inner.as_os_str().is_empty() => relative.join(inner),
                _ => relative.to_path_buf(),
            };
            let working = self.path.join(&path);
            let staged = staging.join(&path);

            let replaced_untracked = if entry.file_type().is_dir() {
                working.is_file() && !(staged.is_file() && files_equal(&working, &staged)?)
            } else {
                working.is_dir() && !(staged.is_dir() && tracks_all(&working, &staged, ignored)?)
            };
            if replaced_untracked {
                conflicts.push(path);
            }
        }

        Ok(conflicts)
    }
}

/// `staged` holds every entry of `working` with the same content
fn tracks_all(working: &Path, staged: &Path, ignored: &[&str]) -> Result<bool> {
    let comparison = deep_compare(
        working,
        staged,
        ignored,
        DeepComparePolicy::AllCommonSubdirs,
    )?;
    let report = comparison.report;

    Ok(report.only_left_files.is_empty()
        && report.only_left_dirs.is_empty()
        && report.changed_files.is_empty())
}
