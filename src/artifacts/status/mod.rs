//! Working tree status inspection
//!
//! Three comparisons make up a status report:
//!
//! - HEAD snapshot against the staging area: changes to be committed
//! - working tree against the staging area: changed files not staged
//! - working tree entries missing from the staging area: untracked
//!
//! The metadata directory is invisible to all three.

pub mod status_info;
