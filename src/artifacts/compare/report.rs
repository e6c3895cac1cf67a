use derive_new::new;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A file present on both sides whose bytes differ
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChangedFile {
    /// Path relative to the compared roots
    pub name: PathBuf,
    /// Full path on the left side
    pub left: PathBuf,
    /// Full path on the right side
    pub right: PathBuf,
}

/// Result of comparing two directories
///
/// Entry paths are relative to `left` and `right`; at the top level they are
/// plain names.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DirsReport {
    pub left: PathBuf,
    pub right: PathBuf,
    #[new(default)]
    pub common_dirs: BTreeSet<PathBuf>,
    #[new(default)]
    pub only_left_dirs: BTreeSet<PathBuf>,
    #[new(default)]
    pub only_right_dirs: BTreeSet<PathBuf>,
    #[new(default)]
    pub only_left_files: BTreeSet<PathBuf>,
    #[new(default)]
    pub only_right_files: BTreeSet<PathBuf>,
    /// Byte-identical files present on both sides
    #[new(default)]
    pub common_files: BTreeSet<PathBuf>,
    #[new(default)]
    pub changed_files: BTreeSet<ChangedFile>,
}

impl DirsReport {
    pub fn equal(&self) -> bool {
        self.only_left_dirs.is_empty()
            && self.only_right_dirs.is_empty()
            && self.only_left_files.is_empty()
            && self.only_right_files.is_empty()
            && self.changed_files.is_empty()
    }

    /// Directories present on one side only
    pub fn different_dirs(&self) -> BTreeSet<PathBuf> {
        self.only_left_dirs
            .union(&self.only_right_dirs)
            .cloned()
            .collect()
    }

    /// One-sided file names, plus both full paths of every changed file
    pub fn different_files(&self) -> BTreeSet<PathBuf> {
        self.only_left_files
            .iter()
            .chain(self.only_right_files.iter())
            .cloned()
            .chain(
                self.changed_files
                    .iter()
                    .flat_map(|changed| [changed.left.clone(), changed.right.clone()]),
            )
            .collect()
    }

    /// Fold a report for a nested level into this one
    pub(crate) fn absorb(&mut self, other: DirsReport) {
        self.common_dirs.extend(other.common_dirs);
        self.only_left_dirs.extend(other.only_left_dirs);
        self.only_right_dirs.extend(other.only_right_dirs);
        self.only_left_files.extend(other.only_left_files);
        self.only_right_files.extend(other.only_right_files);
        self.common_files.extend(other.common_files);
        self.changed_files.extend(other.changed_files);
    }
}
