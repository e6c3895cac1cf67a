use crate::areas::repository::Repository;
use crate::artifacts::compare::{DeepComparePolicy, compare_dirs, deep_compare, divergent_paths};
use crate::artifacts::errors::{Result, WitError};
use crate::artifacts::graph::CommitGraph;
use crate::artifacts::objects::commit_id::CommitId;
use crate::commands::porcelain::commit::CommitOutcome;
use std::collections::BTreeSet;
use std::path::PathBuf;

impl Repository {
    /// Bring a branch's changes since the common ancestor into HEAD
    ///
    /// Every path that differs between the common ancestor and the branch
    /// tip, and exists on the branch side, is copied from the branch
    /// snapshot into the staging area and the working tree. The result is
    /// committed with HEAD as first parent and the branch tip as second.
    /// Paths only the ancestor has are not deleted. Pending changes, or
    /// untracked entries an incoming path would replace, refuse the merge.
    pub fn merge(&mut self, branch: &str) -> Result<CommitOutcome> {
        self.require_repository()?;
        if branch.is_empty() {
            return Err(WitError::MissingArgument("branch"));
        }
        let _lock = self.lock()?;

        let entry = self
            .refs()
            .find_branch(branch)?
            .ok_or_else(|| WitError::BranchNotFound(branch.to_string()))?;
        let target = entry
            .target
            .ok_or_else(|| WitError::InvalidCommitId(format!("{branch} (no commits yet)")))?;
        let head = self
            .refs()
            .read_head()?
            .ok_or_else(|| WitError::InvalidCommitId("HEAD (no commits yet)".to_string()))?;

        let graph = CommitGraph::new(|id| self.database().load_slim_commit(id));
        let base = graph
            .common_ancestor(&target, &head)?
            .ok_or_else(|| WitError::NoCommonAncestor(branch.to_string(), head.to_string()))?;

        let changed = self.divergent_since(&base, &target)?;
        tracing::info!(
            branch,
            base = %base,
            paths = changed.len(),
            "merging"
        );

        let snapshot = self.database().snapshot_path(&target);
        let incoming = changed
            .iter()
            .filter(|path| snapshot.join(path).exists())
            .collect::<Vec<_>>();

        self.require_clean_tree("merge")?;
        self.require_no_untracked_overwrite(
            "merge",
            &snapshot,
            incoming.iter().map(|path| path.as_path()),
        )?;

        for relative in incoming {
            self.staging()
                .add(&snapshot.join(relative), relative, &[])?;
            self.workspace().restore_path(&snapshot, relative)?;
        }

        let message = format!("Branch: {} -> merge with {}", branch, head);
        self.write_commit(&message, Some(&target))
    }

    /// Paths relative to the snapshot root that differ between two commits
    fn divergent_since(&self, base: &CommitId, target: &CommitId) -> Result<BTreeSet<PathBuf>> {
        let target_snapshot = self.database().snapshot_path(target);
        let base_snapshot = self.database().snapshot_path(base);

        let report = match self.config().compare_policy {
            // top level only
            DeepComparePolicy::FirstCommonSubdir => {
                compare_dirs(&target_snapshot, &base_snapshot, &[])?
            }
            policy => deep_compare(&target_snapshot, &base_snapshot, &[], policy)?.report,
        };

        Ok(divergent_paths(&report))
    }
}
