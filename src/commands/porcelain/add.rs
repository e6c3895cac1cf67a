use crate::areas::repository::Repository;
use crate::artifacts::errors::{Result, WitError};
use std::path::Path;

impl Repository {
    /// Copy a file or directory of the working tree into the staging area
    ///
    /// Adding the working tree root stages everything except the metadata
    /// directory. Adding the same unchanged path twice is a no-op.
    pub fn add(&mut self, target: &Path) -> Result<()> {
        self.require_repository()?;
        if target.as_os_str().is_empty() {
            return Err(WitError::MissingArgument("path"));
        }
        let _lock = self.lock()?;

        let (source, relative) = self.workspace().relative_path(target)?;
        if relative
            .components()
            .any(|component| component.as_os_str() == self.layout().metadata_dir.as_str())
        {
            return Err(WitError::PathOutsideRepository {
                path: source,
                root: self.path().to_path_buf(),
            });
        }

        self.staging().add(&source, &relative, &self.ignored())?;

        Ok(())
    }
}
