//! # wit
//!
//! A minimal local version-control engine. A repository keeps its state in a
//! `.wit` metadata directory: a reference table, the active branch, a staging
//! area and one full snapshot per commit.
//!
//! - `areas`: the on-disk parts of a repository
//! - `artifacts`: data types and algorithms shared by the commands
//! - `commands`: user-facing operations, each implemented on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
