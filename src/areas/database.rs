use crate::artifacts::core::copy_into;
use crate::artifacts::errors::{IoContext, Result, WitError};
use crate::artifacts::objects::commit::{CommitRecord, SlimCommit};
use crate::artifacts::objects::commit_id::CommitId;
use std::path::{Path, PathBuf};

const RECORD_EXTENSION: &str = "txt";

/// Snapshot store under `images/`
///
/// Each commit owns a full copy of the staging area at `images/<id>/` and a
/// record at `images/<id>.txt`. Neither is modified after being written.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn images_path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot_path(&self, id: &CommitId) -> PathBuf {
        self.path.join(id.as_ref())
    }

    pub fn record_path(&self, id: &CommitId) -> PathBuf {
        self.path
            .join(format!("{}.{}", id.as_ref(), RECORD_EXTENSION))
    }

    pub fn has_snapshot(&self, id: &CommitId) -> bool {
        self.snapshot_path(id).is_dir() && self.record_path(id).is_file()
    }

    /// Write the record, then copy `staging` into a fresh snapshot directory
    pub fn store(&self, id: &CommitId, record: &CommitRecord, staging: &Path) -> Result<()> {
        let record_path = self.record_path(id);
        let snapshot_path = self.snapshot_path(id);

        if snapshot_path.exists() || record_path.exists() {
            return Err(WitError::corrupted(
                &snapshot_path,
                "snapshot already exists for a new commit id",
            ));
        }

        std::fs::create_dir_all(&self.path).at(&self.path)?;
        std::fs::write(&record_path, record.serialize()).at(&record_path)?;
        std::fs::create_dir_all(&snapshot_path).at(&snapshot_path)?;
        copy_into(staging, &snapshot_path, &[])?;

        tracing::debug!(commit = %id, parents = record.parents().len(), "stored snapshot");

        Ok(())
    }

    pub fn load(&self, id: &CommitId) -> Result<CommitRecord> {
        let record_path = self.record_path(id);
        if !record_path.is_file() {
            return Err(WitError::InvalidCommitId(id.to_string()));
        }

        let content = std::fs::read_to_string(&record_path).at(&record_path)?;
        CommitRecord::parse(&content, &record_path)
    }

    pub fn load_slim_commit(&self, id: &CommitId) -> Result<SlimCommit> {
        Ok(self.load(id)?.to_slim(id.clone()))
    }

    /// Every commit with a readable record, in no particular order
    pub fn list_commits(&self) -> Result<Vec<(CommitId, CommitRecord)>> {
        let mut commits = Vec::new();

        for entry in std::fs::read_dir(&self.path).at(&self.path)? {
            let entry = entry.at(&self.path)?;
            let path = entry.path();

            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            let id = match path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(CommitId::try_parse)
            {
                Some(id) => id,
                None => {
                    tracing::warn!(path = %path.display(), "skipping unrecognized record");
                    continue;
                }
            };

            let record = self.load(&id)?;
            commits.push((id, record));
        }

        Ok(commits)
    }
}
