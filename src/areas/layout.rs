//! Repository layout and runtime configuration
//!
//! Every on-disk name lives in [`RepositoryLayout`] and is handed to the
//! areas that need it; nothing reads a global constant. [`Config`] carries
//! the knobs that can be set from the environment:
//!
//! - `WIT_COMPARE_POLICY`: `first` or `all` (default `all`)
//! - `WIT_COMMIT_DATE`: fixed commit timestamp, record format or RFC 2822
//! - `WIT_LOG`: tracing filter, read by the binary

use crate::artifacts::compare::DeepComparePolicy;
use crate::artifacts::objects::commit::parse_date;
use chrono::{DateTime, FixedOffset};
use std::path::{Path, PathBuf};

pub const COMPARE_POLICY_ENV: &str = "WIT_COMPARE_POLICY";
pub const COMMIT_DATE_ENV: &str = "WIT_COMMIT_DATE";
pub const LOG_ENV: &str = "WIT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    /// Marker directory searched for by discovery
    pub metadata_dir: String,
    pub references_file: String,
    pub active_branch_file: String,
    pub staging_dir: String,
    pub images_dir: String,
    pub lock_file: String,
}

impl Default for RepositoryLayout {
    fn default() -> Self {
        RepositoryLayout {
            metadata_dir: ".wit".to_string(),
            references_file: "references.txt".to_string(),
            active_branch_file: "activated.txt".to_string(),
            staging_dir: "staging_area".to_string(),
            images_dir: "images".to_string(),
            lock_file: "wit.lock".to_string(),
        }
    }
}

impl RepositoryLayout {
    pub fn metadata_path(&self, worktree: &Path) -> PathBuf {
        worktree.join(&self.metadata_dir)
    }

    /// Walk from `start` up to the filesystem root; nearest marker wins
    pub fn discover(&self, start: &Path) -> Option<PathBuf> {
        let mut current = if start.is_file() {
            start.parent()?
        } else {
            start
        };

        loop {
            if self.metadata_path(current).is_dir() {
                return Some(current.to_path_buf());
            }
            current = current.parent()?;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub compare_policy: DeepComparePolicy,
    /// Overrides "now" for new commit records
    pub commit_date: Option<DateTime<FixedOffset>>,
}

impl Config {
    pub fn from_env() -> Self {
        let compare_policy = std::env::var(COMPARE_POLICY_ENV)
            .ok()
            .and_then(|value| match value.parse() {
                Ok(policy) => Some(policy),
                Err(err) => {
                    tracing::warn!("ignoring {}: {}", COMPARE_POLICY_ENV, err);
                    None
                }
            })
            .unwrap_or_default();

        let commit_date = std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|value| parse_date(&value));

        Config {
            compare_policy,
            commit_date,
        }
    }

    pub fn commit_date_or_now(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }
}
