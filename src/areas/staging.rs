use crate::artifacts::core::{clear_dir, copy_into};
use crate::artifacts::errors::Result;
use std::path::Path;

/// The staging area: a plain directory mirroring the next snapshot
#[derive(Debug)]
pub struct Staging {
    path: Box<Path>,
}

impl Staging {
    pub fn new(path: Box<Path>) -> Self {
        Staging { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy `source` to `relative` inside the staging area
    ///
    /// An empty `relative` merges `source` into the staging root.
    pub fn add(&self, source: &Path, relative: &Path, ignored: &[&str]) -> Result<()> {
        let target = self.path.join(relative);
        tracing::debug!(source = %source.display(), target = %target.display(), "staging");

        copy_into(source, &target, ignored)
    }

    /// Replace the whole staging area with the contents of `snapshot`
    pub fn reset_to(&self, snapshot: &Path) -> Result<()> {
        clear_dir(&self.path)?;
        copy_into(snapshot, &self.path, &[])
    }
}
