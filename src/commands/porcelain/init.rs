use crate::areas::repository::Repository;
use crate::artifacts::errors::{IoContext, Result, WitError};
use std::fs;

impl Repository {
    pub fn init(&mut self) -> Result<()> {
        let metadata = self.metadata_path();
        if metadata.exists() {
            return Err(WitError::AlreadyInitialized(self.path().to_path_buf()));
        }

        let images = self.database().images_path();
        fs::create_dir_all(images).at(images)?;

        let staging = self.staging().path();
        fs::create_dir_all(staging).at(staging)?;

        self.refs().init()?;

        tracing::info!(path = %self.path().display(), "initialized repository");
        self.emit(format!(
            "Initialized empty wit repository in {}",
            metadata.display()
        ))?;

        Ok(())
    }
}
