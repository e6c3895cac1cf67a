use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::compare::{deep_compare, divergent_paths};
use crate::artifacts::errors::{Result, WitError};
use crate::artifacts::objects::commit_id::CommitId;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub type FileSet = BTreeSet<PathBuf>;

/// Snapshot of the repository state, paths relative to their roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub head: Option<CommitId>,
    /// `None` when HEAD is detached
    pub active_branch: Option<BranchName>,
    pub to_be_committed: FileSet,
    pub not_staged: FileSet,
    pub untracked: FileSet,
}

impl StatusReport {
    /// Staged or unstaged changes exist; untracked entries do not count
    pub fn is_dirty(&self) -> bool {
        !self.to_be_committed.is_empty() || !self.not_staged.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> Result<StatusReport> {
        let refs = self.repository.refs();
        let head = refs.read_head()?;
        let active_branch = refs.active_branch()?;

        let to_be_committed = self.staged_changes(head.as_ref())?;
        let (not_staged, untracked) = self.workspace_changes()?;

        Ok(StatusReport {
            head,
            active_branch,
            to_be_committed,
            not_staged,
            untracked,
        })
    }

    fn staged_changes(&self, head: Option<&CommitId>) -> Result<FileSet> {
        let staging = self.repository.staging().path();

        match head {
            Some(head) => {
                let snapshot = self.repository.database().snapshot_path(head);
                let comparison = deep_compare(
                    &snapshot,
                    staging,
                    &[],
                    self.repository.config().compare_policy,
                )?;

                Ok(divergent_paths(&comparison.report))
            }
            // before the first commit everything staged is new
            None => list_files(staging),
        }
    }

    fn workspace_changes(&self) -> Result<(FileSet, FileSet)> {
        let comparison = deep_compare(
            self.repository.workspace().path(),
            self.repository.staging().path(),
            &self.repository.ignored(),
            self.repository.config().compare_policy,
        )?;
        let report = comparison.report;

        let not_staged = report
            .changed_files
            .iter()
            .map(|changed| changed.name.clone())
            .collect();
        let untracked = report
            .only_left_files
            .into_iter()
            .chain(report.only_left_dirs)
            .collect();

        Ok((not_staged, untracked))
    }
}

fn list_files(root: &Path) -> Result<FileSet> {
    let mut files = FileSet::new();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|err| WitError::Io {
            path: err.path().unwrap_or(root).to_path_buf(),
            source: err.into(),
        })?;

        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.insert(relative.to_path_buf());
        }
    }

    Ok(files)
}
