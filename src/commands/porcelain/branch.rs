use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::{Result, WitError};

impl Repository {
    /// Record a new branch pointing at HEAD
    ///
    /// The branch is not activated; HEAD and the active branch stay as they are.
    pub fn branch(&mut self, name: &str) -> Result<()> {
        self.require_repository()?;
        let name = BranchName::try_parse(name.to_string())?;
        let _lock = self.lock()?;

        if self.refs().branch_exists(&name)? {
            return Err(WitError::BranchAlreadyExists(name.to_string()));
        }

        let head = self.refs().read_head()?;
        self.refs().append_branch(&name, head.as_ref())?;

        tracing::info!(branch = %name, "created branch");

        Ok(())
    }
}
