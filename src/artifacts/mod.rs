//! Data structures and algorithms
//!
//! - `branch`: branch names and revision resolution
//! - `compare`: directory comparator
//! - `core`: tree copy helpers
//! - `errors`: error taxonomy shared by every operation
//! - `graph`: commit graph traversal and common-ancestor search
//! - `objects`: commit identifiers and commit records
//! - `status`: working tree status inspection

pub mod branch;
pub mod compare;
pub mod core;
pub mod errors;
pub mod graph;
pub mod objects;
pub mod status;
