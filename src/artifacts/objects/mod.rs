//! Commit identifiers and commit records
//!
//! A commit is an opaque random identifier plus a three-line record stored
//! beside its snapshot:
//!
//! ```text
//! parent=<id[,id]|None>
//! date=<timestamp>
//! message=<text>
//! ```

pub mod commit;
pub mod commit_id;

/// Length of a generated commit identifier
pub const COMMIT_ID_LENGTH: usize = 40;

/// Sentinel written wherever a commit id or branch name is absent
pub const NONE_SENTINEL: &str = "None";
