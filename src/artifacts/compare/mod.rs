//! Directory comparator
//!
//! Compares two directory trees by name and by exact file bytes. There is no
//! diff algorithm: a pair of files is either identical or changed.
//!
//! ## Single-level comparison
//!
//! [`compare_dirs`] inspects the immediate children of both roots and
//! produces a [`DirsReport`]. The report is `equal` iff no directory and no
//! file differs at that level; common subdirectories are only listed.
//!
//! ## Deep comparison
//!
//! [`deep_compare`] decides whether two whole trees are equal, under one of
//! two [`DeepComparePolicy`] values:
//!
//! - `FirstCommonSubdir` compares the top level, stops on inequality, and
//!   otherwise recurses into the first common subdirectory (in name order)
//!   only, returning that single result. Differences hidden in any other
//!   common subdirectory are never seen.
//! - `AllCommonSubdirs` walks every common subdirectory and folds each
//!   level into one report keyed by paths relative to the roots. Two trees
//!   are equal iff no level diverges.
//!
//! `AllCommonSubdirs` is the default. `FirstCommonSubdir` remains available
//! for repositories that depend on the old results.

pub mod report;

pub use report::{ChangedFile, DirsReport};

use crate::artifacts::errors::{IoContext, Result};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeepComparePolicy {
    /// Recurse into only the first common subdirectory
    FirstCommonSubdir,
    /// Recurse into every common subdirectory and merge the results
    #[default]
    AllCommonSubdirs,
}

impl FromStr for DeepComparePolicy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(DeepComparePolicy::FirstCommonSubdir),
            "all" => Ok(DeepComparePolicy::AllCommonSubdirs),
            other => Err(format!("unknown compare policy `{other}`")),
        }
    }
}

/// Outcome of [`deep_compare`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepComparison {
    pub equal: bool,
    pub report: DirsReport,
}

/// Compare the immediate children of `left` and `right`
///
/// Entries whose name is in `ignored` do not exist for the comparison.
pub fn compare_dirs(left: &Path, right: &Path, ignored: &[&str]) -> Result<DirsReport> {
    compare_level(left, right, Path::new(""), ignored)
}

pub fn deep_compare(
    left: &Path,
    right: &Path,
    ignored: &[&str],
    policy: DeepComparePolicy,
) -> Result<DeepComparison> {
    match policy {
        DeepComparePolicy::FirstCommonSubdir => first_common_subdir(left, right, Path::new(""), ignored),
        DeepComparePolicy::AllCommonSubdirs => {
            let mut report = DirsReport::new(left.to_path_buf(), right.to_path_buf());
            walk_all(left, right, Path::new(""), ignored, &mut report)?;

            Ok(DeepComparison {
                equal: report.equal(),
                report,
            })
        }
    }
}

fn first_common_subdir(
    left: &Path,
    right: &Path,
    relative: &Path,
    ignored: &[&str],
) -> Result<DeepComparison> {
    let report = compare_level(left, right, relative, ignored)?;

    if !report.equal() {
        return Ok(DeepComparison {
            equal: false,
            report,
        });
    }

    match report.common_dirs.iter().next() {
        None => Ok(DeepComparison {
            equal: true,
            report,
        }),
        Some(first) => {
            tracing::trace!(subdir = %first.display(), "recursing into first common subdirectory");
            first_common_subdir(left, right, first, ignored)
        }
    }
}

fn walk_all(
    left: &Path,
    right: &Path,
    relative: &Path,
    ignored: &[&str],
    report: &mut DirsReport,
) -> Result<()> {
    let level = compare_level(left, right, relative, ignored)?;
    let common_dirs = level.common_dirs.clone();
    report.absorb(level);

    for dir in common_dirs {
        walk_all(left, right, &dir, ignored, report)?;
    }

    Ok(())
}

/// Compare `left/relative` with `right/relative`, naming entries relative to the roots
fn compare_level(left: &Path, right: &Path, relative: &Path, ignored: &[&str]) -> Result<DirsReport> {
    let left_dir = left.join(relative);
    let right_dir = right.join(relative);

    let (left_dirs, left_files) = list_entries(&left_dir, ignored)?;
    let (right_dirs, right_files) = list_entries(&right_dir, ignored)?;

    let mut report = DirsReport::new(left.to_path_buf(), right.to_path_buf());
    let name = |entry: &OsString| relative.join(entry);

    report.common_dirs = left_dirs.intersection(&right_dirs).map(name).collect();
    report.only_left_dirs = left_dirs.difference(&right_dirs).map(name).collect();
    report.only_right_dirs = right_dirs.difference(&left_dirs).map(name).collect();
    report.only_left_files = left_files.difference(&right_files).map(name).collect();
    report.only_right_files = right_files.difference(&left_files).map(name).collect();

    for file in left_files.intersection(&right_files) {
        let left_path = left_dir.join(file);
        let right_path = right_dir.join(file);

        if files_equal(&left_path, &right_path)? {
            report.common_files.insert(name(file));
        } else {
            report.changed_files.insert(ChangedFile {
                name: name(file),
                left: left_path,
                right: right_path,
            });
        }
    }

    Ok(report)
}

fn list_entries(dir: &Path, ignored: &[&str]) -> Result<(BTreeSet<OsString>, BTreeSet<OsString>)> {
    let mut dirs = BTreeSet::new();
    let mut files = BTreeSet::new();

    for entry in std::fs::read_dir(dir).at(dir)? {
        let entry = entry.at(dir)?;
        let file_name = entry.file_name();

        if ignored.iter().any(|ignored| file_name == **ignored) {
            continue;
        }

        if entry.path().is_dir() {
            dirs.insert(file_name);
        } else {
            files.insert(file_name);
        }
    }

    Ok((dirs, files))
}

/// Byte-exact equality
pub fn files_equal(left: &Path, right: &Path) -> Result<bool> {
    let left_len = std::fs::metadata(left).at(left)?.len();
    let right_len = std::fs::metadata(right).at(right)?.len();
    if left_len != right_len {
        return Ok(false);
    }

    Ok(std::fs::read(left).at(left)? == std::fs::read(right).at(right)?)
}

/// Paths relative to a snapshot root that appear in `report` as divergent
pub fn divergent_paths(report: &DirsReport) -> BTreeSet<PathBuf> {
    report
        .different_dirs()
        .into_iter()
        .chain(report.only_left_files.iter().cloned())
        .chain(report.only_right_files.iter().cloned())
        .chain(report.changed_files.iter().map(|changed| changed.name.clone()))
        .collect()
}
