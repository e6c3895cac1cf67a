//! Repository areas
//!
//! - `database`: snapshot store (`images/`)
//! - `layout`: on-disk names and runtime configuration
//! - `refs`: reference table and active branch pointer
//! - `repository`: discovery, locking and wiring of the other areas
//! - `staging`: the staging area directory
//! - `workspace`: the working tree

pub mod database;
pub mod layout;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
