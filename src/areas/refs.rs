//! Reference table and active branch pointer
//!
//! The reference table is a flat text file of `name=value` lines:
//!
//! - line 0 is always `HEAD`, the checked-out commit
//! - line 1 is always `master`, the default branch
//! - lines 2.. are user branches in creation order
//!
//! Values are commit identifiers or the `None` sentinel. The active branch
//! pointer is a separate single-line file holding a branch name, or `None`
//! when HEAD is detached.
//!
//! Every write rewrites the whole file under an exclusive lock; there is no
//! atomic-rename step, so a crash mid-write can leave a truncated table.

use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::{IoContext, Result, WitError};
use crate::artifacts::objects::NONE_SENTINEL;
use crate::artifacts::objects::commit_id::CommitId;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// One parsed `name=value` line of the reference table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    pub name: String,
    pub target: Option<CommitId>,
}

impl RefEntry {
    fn parse(line: &str, path: &Path) -> Result<Self> {
        let (name, value) = line
            .split_once('=')
            .ok_or_else(|| WitError::corrupted(path, format!("malformed reference `{line}`")))?;
        let target = CommitId::try_parse_pointer(value).ok_or_else(|| {
            WitError::corrupted(path, format!("malformed commit id in `{line}`"))
        })?;

        Ok(RefEntry {
            name: name.trim().to_string(),
            target,
        })
    }

    fn render(&self) -> String {
        format!(
            "{}={}",
            self.name,
            CommitId::pointer_to_string(self.target.as_ref())
        )
    }
}

#[derive(Debug)]
pub struct Refs {
    references_path: Box<Path>,
    active_branch_path: Box<Path>,
}

impl Refs {
    pub fn new(references_path: Box<Path>, active_branch_path: Box<Path>) -> Self {
        Refs {
            references_path,
            active_branch_path,
        }
    }

    pub fn references_path(&self) -> &Path {
        &self.references_path
    }

    pub fn active_branch_path(&self) -> &Path {
        &self.active_branch_path
    }

    /// Write the initial table (`HEAD=None`, `master=None`) and activate `master`
    pub fn init(&self) -> Result<()> {
        let head = RefEntry {
            name: HEAD_REF_NAME.to_string(),
            target: None,
        };
        let master = RefEntry {
            name: DEFAULT_BRANCH.to_string(),
            target: None,
        };

        self.write_lines(&[head.render(), master.render()])?;
        self.set_active_branch(Some(&BranchName::default_branch()))
    }

    pub fn read_head(&self) -> Result<Option<CommitId>> {
        self.read_table()?
            .into_iter()
            .next()
            .map(|entry| entry.target)
            .ok_or_else(|| WitError::corrupted(&self.references_path, "missing HEAD reference"))
    }

    pub fn read_master(&self) -> Result<Option<CommitId>> {
        self.read_table()?
            .into_iter()
            .nth(1)
            .map(|entry| entry.target)
            .ok_or_else(|| {
                WitError::corrupted(&self.references_path, "missing master reference")
            })
    }

    /// Linear scan over `master` and user branches; first match wins
    pub fn find_branch(&self, name: &str) -> Result<Option<RefEntry>> {
        Ok(self
            .read_table()?
            .into_iter()
            .skip(1)
            .find(|entry| entry.name == name))
    }

    pub fn branch_exists(&self, name: &BranchName) -> Result<bool> {
        Ok(self.find_branch(name.as_ref())?.is_some())
    }

    /// `master` followed by user branches, in table order
    pub fn list_branches(&self) -> Result<Vec<RefEntry>> {
        Ok(self.read_table()?.into_iter().skip(1).collect())
    }

    /// Rewrite lines 0 and 1, keeping every other line verbatim
    pub fn set_head_and_master(
        &self,
        head: Option<&CommitId>,
        master: Option<&CommitId>,
    ) -> Result<()> {
        let mut lines = self.read_lines()?;
        lines[0] = RefEntry {
            name: HEAD_REF_NAME.to_string(),
            target: head.cloned(),
        }
        .render();
        lines[1] = RefEntry {
            name: DEFAULT_BRANCH.to_string(),
            target: master.cloned(),
        }
        .render();

        self.write_lines(&lines)
    }

    pub fn update_head(&self, head: &CommitId) -> Result<()> {
        let master = self.read_master()?;
        self.set_head_and_master(Some(head), master.as_ref())
    }

    /// Point an existing branch (`master` included) at `target`
    pub fn update_branch(&self, name: &BranchName, target: &CommitId) -> Result<()> {
        let mut lines = self.read_lines()?;
        let position = lines
            .iter()
            .skip(1)
            .position(|line| {
                line.split_once('=')
                    .is_some_and(|(found, _)| found.trim() == name.as_ref())
            })
            .ok_or_else(|| WitError::BranchNotFound(name.to_string()))?;

        lines[position + 1] = RefEntry {
            name: name.to_string(),
            target: Some(target.clone()),
        }
        .render();

        self.write_lines(&lines)
    }

    /// Add a new trailing branch line
    pub fn append_branch(&self, name: &BranchName, target: Option<&CommitId>) -> Result<()> {
        if self.branch_exists(name)? {
            return Err(WitError::BranchAlreadyExists(name.to_string()));
        }

        let mut lines = self.read_lines()?;
        lines.push(
            RefEntry {
                name: name.to_string(),
                target: target.cloned(),
            }
            .render(),
        );

        self.write_lines(&lines)
    }

    /// The branch HEAD follows, or `None` when detached
    pub fn active_branch(&self) -> Result<Option<BranchName>> {
        let content =
            std::fs::read_to_string(&self.active_branch_path).at(&self.active_branch_path)?;
        let content = content.trim();

        if content.is_empty() || content == NONE_SENTINEL {
            return Ok(None);
        }

        BranchName::try_parse(content.to_string())
            .map(Some)
            .map_err(|_| {
                WitError::corrupted(
                    &self.active_branch_path,
                    format!("invalid branch `{content}`"),
                )
            })
    }

    pub fn set_active_branch(&self, branch: Option<&BranchName>) -> Result<()> {
        let content = branch
            .map(|branch| branch.to_string())
            .unwrap_or_else(|| NONE_SENTINEL.to_string());

        Self::write_locked(&self.active_branch_path, &content)
    }

    pub fn read_table(&self) -> Result<Vec<RefEntry>> {
        let table = self
            .read_lines()?
            .iter()
            .map(|line| RefEntry::parse(line, &self.references_path))
            .collect::<Result<Vec<_>>>()?;

        Ok(table)
    }

    /// Raw non-empty lines; checks the two reserved leading entries
    fn read_lines(&self) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(&self.references_path).at(&self.references_path)?;
        let lines = content
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();

        let leading = lines
            .iter()
            .take(2)
            .map(|line| line.split_once('=').map(|(name, _)| name.trim()))
            .collect::<Vec<_>>();
        if leading != [Some(HEAD_REF_NAME), Some(DEFAULT_BRANCH)] {
            return Err(WitError::corrupted(
                &self.references_path,
                "the first two references must be HEAD and master",
            ));
        }

        Ok(lines)
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        Self::write_locked(&self.references_path, &lines.join("\n"))
    }

    fn write_locked(path: &Path, content: &str) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .at(path)?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1).at(path)?;
        lock.deref_mut().write_all(content.as_bytes()).at(path)?;

        Ok(())
    }
}
