//! Error taxonomy for repository operations
//!
//! Every failure a command can report is a distinct [`WitError`] kind, so
//! callers can match on the reason instead of parsing console text.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WitError>;

#[derive(Debug, Error)]
pub enum WitError {
    /// no metadata directory in the path or any of its parents
    #[error("not a wit repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    #[error("a repository already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("branch {0} does not exist")]
    BranchNotFound(String),

    #[error("branch {0} already exists")]
    BranchAlreadyExists(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    /// checkout or merge refused because pending work would be overwritten
    #[error(
        "{command} refused: {staged} staged and {unstaged} unstaged change(s) would be overwritten"
    )]
    DirtyWorkingTree {
        command: &'static str,
        staged: usize,
        unstaged: usize,
    },

    /// an untracked entry sits where the incoming snapshot writes the other kind
    #[error("{command} refused: untracked {} would be overwritten", join_paths(.paths))]
    UntrackedWouldBeOverwritten {
        command: &'static str,
        paths: Vec<PathBuf>,
    },

    #[error("{0} is not a known commit")]
    InvalidCommitId(String),

    #[error("no common ancestor between {0} and {1}")]
    NoCommonAncestor(String, String),

    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("{path} is outside the repository at {root}")]
    PathOutsideRepository { path: PathBuf, root: PathBuf },

    #[error("corrupted metadata at {path}: {reason}")]
    CorruptedMetadata { path: PathBuf, reason: String },

    #[error("repository is locked by another command ({0})")]
    RepositoryLocked(PathBuf),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WitError {
    pub fn corrupted(path: &Path, reason: impl Into<String>) -> Self {
        WitError::CorruptedMetadata {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Attaches the offending path to an `io::Error`
pub trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|source| WitError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
