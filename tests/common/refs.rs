use std::path::{Path, PathBuf};

pub fn metadata_dir(dir: &Path) -> PathBuf {
    dir.join(".wit")
}

/// `(name, value)` pairs of the reference table, in file order
pub fn read_references(dir: &Path) -> Vec<(String, String)> {
    let content = std::fs::read_to_string(metadata_dir(dir).join("references.txt"))
        .expect("Failed to read references.txt");

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (name, value) = line.split_once('=').expect("malformed reference line");
            (name.to_string(), value.to_string())
        })
        .collect()
}

pub fn reference(dir: &Path, name: &str) -> Option<String> {
    read_references(dir)
        .into_iter()
        .find(|(entry, _)| entry == name)
        .map(|(_, value)| value)
}

pub fn head(dir: &Path) -> String {
    reference(dir, "HEAD").expect("HEAD line missing")
}

pub fn active_branch(dir: &Path) -> String {
    std::fs::read_to_string(metadata_dir(dir).join("activated.txt"))
        .expect("Failed to read activated.txt")
        .trim()
        .to_string()
}

pub fn snapshot_dir(dir: &Path, id: &str) -> PathBuf {
    metadata_dir(dir).join("images").join(id)
}

pub fn staging_dir(dir: &Path) -> PathBuf {
    metadata_dir(dir).join("staging_area")
}

/// Parent ids of a commit, empty for the root commit
pub fn parents(dir: &Path, id: &str) -> Vec<String> {
    let record = std::fs::read_to_string(metadata_dir(dir).join("images").join(format!("{id}.txt")))
        .expect("Failed to read commit record");
    let parent_line = record.lines().next().expect("empty commit record");
    let value = parent_line
        .strip_prefix("parent=")
        .expect("record does not start with parent=");

    value
        .split(',')
        .filter(|parent| !parent.is_empty() && *parent != "None")
        .map(str::to_string)
        .collect()
}

pub fn commit_count(dir: &Path) -> usize {
    std::fs::read_dir(metadata_dir(dir).join("images"))
        .expect("Failed to list images")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .count()
}
