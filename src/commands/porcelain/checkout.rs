use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::errors::{Result, WitError};
use crate::artifacts::objects::commit_id::CommitId;
use std::path::Path;

impl Repository {
    /// Move HEAD to a branch or commit and restore its snapshot
    ///
    /// The working tree receives a merge-copy of the snapshot: files the
    /// snapshot lacks stay behind. Pending changes, or untracked entries the
    /// snapshot would replace, refuse the checkout. The staging area is
    /// replaced outright. Branch pointers never move here.
    pub fn checkout(&mut self, argument: &str) -> Result<CommitId> {
        self.require_repository()?;
        let _lock = self.lock()?;

        let revision = Revision::resolve(argument, self.refs())?;
        let target = revision
            .target()
            .cloned()
            .ok_or_else(|| WitError::InvalidCommitId(argument.to_string()))?;
        if !self.database().has_snapshot(&target) {
            return Err(WitError::InvalidCommitId(argument.to_string()));
        }

        self.require_clean_tree("checkout")?;
        let snapshot = self.database().snapshot_path(&target);
        self.require_no_untracked_overwrite("checkout", &snapshot, [Path::new("")])?;

        self.workspace().restore_from(&snapshot, &self.ignored())?;
        self.refs().update_head(&target)?;
        self.refs().set_active_branch(revision.branch_name())?;
        self.staging().reset_to(&snapshot)?;

        match revision.branch_name() {
            Some(branch) => self.emit(format!("Switched to branch '{}'", branch))?,
            None => self.emit(format!("HEAD is now at {}", target.to_short_id()))?,
        }

        Ok(target)
    }
}
