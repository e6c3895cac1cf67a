use crate::common::command::{commit_file, init_repository_dir, run_wit_command};
use crate::common::file::{FileSpec, list_tree, read_file, write_file};
use crate::common::refs::{active_branch, head, reference, staging_dir};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;

mod common;

#[rstest]
fn checkout_an_older_commit_restores_its_snapshot(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head(dir);
    let second = commit_file(dir, "a.txt", "world", "second");

    run_wit_command(dir, &["checkout", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "HEAD is now at {}",
            &first[..7]
        )));

    assert_eq!(read_file(&dir.join("a.txt")), "hello");
    assert_eq!(read_file(&staging_dir(dir).join("a.txt")), "hello");
    assert_eq!(head(dir), first);
    assert_eq!(reference(dir, "master"), Some(second));
    assert_eq!(active_branch(dir), "None");
}

#[rstest]
fn checkout_a_branch_activates_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head(dir);
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "world", "second");

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch 'feature'"));

    assert_eq!(head(dir), first);
    assert_eq!(active_branch(dir), "feature");
    assert_eq!(read_file(&dir.join("a.txt")), "hello");
}

#[rstest]
fn checkout_master_reattaches_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head(dir);
    let second = commit_file(dir, "a.txt", "world", "second");
    run_wit_command(dir, &["checkout", &first]).assert().success();

    run_wit_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(head(dir), second);
    assert_eq!(active_branch(dir), "master");
    assert_eq!(read_file(&dir.join("a.txt")), "world");
}

#[rstest]
fn commits_on_a_checked_out_branch_advance_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    let master = reference(dir, "master");

    let next = commit_file(dir, "b.txt", "x", "on feature");

    assert_eq!(reference(dir, "feature"), Some(next));
    assert_eq!(reference(dir, "master"), master);
}

#[rstest]
fn unstaged_changes_block_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head(dir);
    let second = commit_file(dir, "a.txt", "world", "second");
    write_file(FileSpec::new(dir.join("a.txt"), "local edit".to_string()));

    run_wit_command(dir, &["checkout", &first])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("checkout refused"));

    assert_eq!(head(dir), second);
    assert_eq!(active_branch(dir), "master");
    assert_eq!(read_file(&dir.join("a.txt")), "local edit");
}

#[rstest]
fn staged_changes_block_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head(dir);
    commit_file(dir, "a.txt", "world", "second");
    write_file(FileSpec::new(dir.join("new.txt"), "staged".to_string()));
    run_wit_command(dir, &["add", "new.txt"]).assert().success();

    run_wit_command(dir, &["checkout", &first])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 staged"));
}

#[rstest]
fn untracked_files_survive_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head(dir);
    commit_file(dir, "a.txt", "world", "second");
    write_file(FileSpec::new(dir.join("notes.txt"), "mine".to_string()));

    run_wit_command(dir, &["checkout", &first]).assert().success();

    assert_eq!(read_file(&dir.join("notes.txt")), "mine");
    assert_eq!(
        list_tree(&staging_dir(dir)),
        vec![(PathBuf::from("a.txt"), "hello".to_string())]
    );
}

#[rstest]
#[case("not-a-branch")]
#[case("0123456789abcdefghij0123456789abcdefghij")]
fn unknown_targets_leave_the_repository_untouched(
    init_repository_dir: TempDir,
    #[case] target: &str,
) {
    let dir = init_repository_dir.path();
    let before = head(dir);

    run_wit_command(dir, &["checkout", target])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not a known commit"));

    assert_eq!(head(dir), before);
    assert_eq!(active_branch(dir), "master");
}

#[rstest]
fn checking_out_head_is_a_no_op_on_content(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let before = list_tree(dir);

    run_wit_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(list_tree(dir), before);
}

#[rstest]
fn untracked_directory_blocks_checkout_of_a_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let before = head(dir);
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "x", "file x", "feature x");
    run_wit_command(dir, &["checkout", "master"])
        .assert()
        .success();
    std::fs::remove_file(dir.join("x")).unwrap();
    write_file(FileSpec::new(dir.join("x").join("notes.txt"), "mine".to_string()));

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "checkout refused: untracked x would be overwritten",
        ));

    assert_eq!(read_file(&dir.join("x").join("notes.txt")), "mine");
    assert_eq!(head(dir), before);
    assert_eq!(active_branch(dir), "master");
}
