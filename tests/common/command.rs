use crate::common::file::{FileSpec, write_file};
use crate::common::refs::head;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Fixed timestamp used unless a test picks its own
pub const COMMIT_DATE: &str = "Sun Jan 01 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Initialized repository with one commit holding `a.txt = hello` on master
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_wit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));

    run_wit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    wit_commit(repository_dir.path(), "first")
        .assert()
        .success();

    repository_dir
}

pub fn run_wit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("wit").expect("Failed to find wit binary");
    cmd.envs(vec![("NO_COLOR", "1"), ("WIT_LOG", "off")]);
    cmd.env_remove("WIT_COMPARE_POLICY");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn wit_commit(dir: &Path, message: &str) -> Command {
    wit_commit_at(dir, message, COMMIT_DATE)
}

pub fn wit_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_wit_command(dir, &["commit", "-m", message]);
    cmd.env("WIT_COMMIT_DATE", date);
    cmd
}

/// Write, stage and commit a single file; returns the new HEAD
pub fn commit_file(dir: &Path, relative: &str, content: &str, message: &str) -> String {
    write_file(FileSpec::new(dir.join(relative), content.to_string()));

    run_wit_command(dir, &["add", relative]).assert().success();
    wit_commit(dir, message).assert().success();

    head(dir)
}
