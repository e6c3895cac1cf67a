use crate::areas::repository::Repository;
use crate::artifacts::errors::{Result, WitError};
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::status::status_info::{FileSet, Status, StatusReport};
use colored::{ColoredString, Colorize};
use std::path::Path;

impl Repository {
    pub fn status(&self) -> Result<StatusReport> {
        self.require_repository()?;

        Status::new(self).initialize()
    }

    /// Refuse `command` while staged or unstaged changes are pending
    pub(crate) fn require_clean_tree(&self, command: &'static str) -> Result<()> {
        let status = Status::new(self).initialize()?;
        if !status.is_dirty() {
            return Ok(());
        }

        tracing::warn!(
            command,
            staged = ?status.to_be_committed,
            unstaged = ?status.not_staged,
            "pending changes would be overwritten"
        );
        Err(WitError::DirtyWorkingTree {
            command,
            staged: status.to_be_committed.len(),
            unstaged: status.not_staged.len(),
        })
    }

    /// Refuse `command` when writing `paths` of `snapshot` would replace
    /// untracked entries of the working tree
    pub(crate) fn require_no_untracked_overwrite<'p>(
        &self,
        command: &'static str,
        snapshot: &Path,
        paths: impl IntoIterator<Item = &'p Path>,
    ) -> Result<()> {
        let mut conflicts = Vec::new();
        for relative in paths {
            conflicts.extend(self.workspace().overwrite_conflicts(
                snapshot,
                self.staging().path(),
                relative,
                &self.ignored(),
            )?);
        }

        if conflicts.is_empty() {
            return Ok(());
        }

        tracing::warn!(command, paths = ?conflicts, "untracked entries would be overwritten");
        Err(WitError::UntrackedWouldBeOverwritten {
            command,
            paths: conflicts,
        })
    }

    pub fn print_status(&self) -> Result<()> {
        let report = self.status()?;

        self.emit(format!(
            "Commit id: {}",
            CommitId::pointer_to_string(report.head.as_ref())
        ))?;
        match &report.active_branch {
            Some(branch) => self.emit(format!("On branch {}", branch))?,
            None => self.emit("HEAD detached")?,
        }

        self.print_section("Changes to be committed:", &report.to_be_committed, |path| {
            path.green()
        })?;
        self.print_section("Changes not staged for commit:", &report.not_staged, |path| {
            path.red()
        })?;
        self.print_section("Untracked files:", &report.untracked, |path| path.red())?;

        Ok(())
    }

    fn print_section(
        &self,
        title: &str,
        files: &FileSet,
        paint: impl Fn(&str) -> ColoredString,
    ) -> Result<()> {
        self.emit("")?;
        self.emit(title)?;

        for file in files {
            self.emit(format!("\t{}", paint(&file.display().to_string())))?;
        }

        Ok(())
    }
}
