//! Porcelain commands
//!
//! Each command is an `impl Repository` block. Mutating commands take the
//! repository lock for their whole duration.
//!
//! ## Commands
//!
//! - `init`: create the metadata directory
//! - `add`: copy a path into the staging area
//! - `commit`: snapshot the staging area
//! - `status`: compare HEAD, staging area and working tree
//! - `branch`: record a branch at HEAD
//! - `checkout`: switch to a branch or commit
//! - `merge`: merge a branch into HEAD
//! - `graph`: list the commit history

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod graph;
pub mod init;
pub mod merge;
pub mod status;
