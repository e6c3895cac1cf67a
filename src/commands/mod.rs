//! User-facing repository operations

pub mod porcelain;
