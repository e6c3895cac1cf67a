//! Branch names and checkout revisions

pub mod branch_name;
pub mod revision;

/// Anything that would corrupt a `name=value` line or a parent list
pub const INVALID_BRANCH_NAME_REGEX: &str = r"[\s=,/\\\x00-\x1f\x7f]";

/// Names with a fixed meaning in the reference table
pub const RESERVED_BRANCH_NAMES: [&str; 2] = ["HEAD", "None"];

/// The default branch, always on line 1 of the reference table
pub const DEFAULT_BRANCH: &str = "master";
