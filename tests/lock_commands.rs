use crate::common::command::{init_repository_dir, run_wit_command, wit_commit};
use crate::common::file::{FileSpec, write_file};
use crate::common::refs::{head, metadata_dir, staging_dir};
use assert_fs::TempDir;
use file_guard::Lock;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs::{File, OpenOptions};

mod common;

fn open_lock_file(dir: &std::path::Path) -> File {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(metadata_dir(dir).join("wit.lock"))
        .expect("Failed to open wit.lock")
}

#[rstest]
fn held_lock_rejects_a_second_writer(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("b.txt"), "b".to_string()));
    let mut file = open_lock_file(dir);
    let guard = file_guard::lock(&mut file, Lock::Exclusive, 0, 1).expect("Failed to lock");

    run_wit_command(dir, &["add", "b.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("repository is locked by another command"));
    assert!(!staging_dir(dir).join("b.txt").exists());

    drop(guard);

    run_wit_command(dir, &["add", "b.txt"]).assert().success();
    assert!(staging_dir(dir).join("b.txt").exists());
}

#[rstest]
fn held_lock_blocks_commit_but_not_status(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let before = head(dir);
    write_file(FileSpec::new(dir.join("a.txt"), "changed".to_string()));
    run_wit_command(dir, &["add", "a.txt"]).assert().success();
    let mut file = open_lock_file(dir);
    let _guard = file_guard::lock(&mut file, Lock::Exclusive, 0, 1).expect("Failed to lock");

    wit_commit(dir, "blocked")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("repository is locked"));
    run_wit_command(dir, &["status"]).assert().success();

    assert_eq!(head(dir), before);
}
