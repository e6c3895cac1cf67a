use crate::areas::refs::Refs;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::{Result, WitError};
use crate::artifacts::objects::commit_id::CommitId;

/// What a checkout argument refers to.
///
/// Branch names win over identifiers, so a branch that happens to look like
/// a commit id still resolves as a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A named branch, `master` included, with its stored target
    Branch {
        name: BranchName,
        target: Option<CommitId>,
    },
    /// A raw commit identifier; checking it out detaches HEAD
    Commit(CommitId),
}

impl Revision {
    pub fn resolve(argument: &str, refs: &Refs) -> Result<Self> {
        let argument = argument.trim();
        if argument.is_empty() {
            return Err(WitError::MissingArgument("branch or commit id"));
        }

        if let Some(entry) = refs.find_branch(argument)? {
            return Ok(Revision::Branch {
                name: BranchName::try_parse(argument.to_string())?,
                target: entry.target,
            });
        }

        CommitId::try_parse(argument)
            .map(Revision::Commit)
            .ok_or_else(|| WitError::InvalidCommitId(argument.to_string()))
    }

    /// The commit this revision points at, if any
    pub fn target(&self) -> Option<&CommitId> {
        match self {
            Revision::Branch { target, .. } => target.as_ref(),
            Revision::Commit(id) => Some(id),
        }
    }

    pub fn branch_name(&self) -> Option<&BranchName> {
        match self {
            Revision::Branch { name, .. } => Some(name),
            Revision::Commit(_) => None,
        }
    }
}
