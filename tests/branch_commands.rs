use crate::common::command::{
    commit_file, init_repository_dir, repository_dir, run_wit_command,
};
use crate::common::refs::{active_branch, head, read_references, reference};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn create_branch_at_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let id = head(dir);

    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();

    assert_eq!(
        read_references(dir),
        vec![
            ("HEAD".to_string(), id.clone()),
            ("master".to_string(), id.clone()),
            ("feature".to_string(), id),
        ]
    );
    assert_eq!(active_branch(dir), "master");
}

#[rstest]
fn branches_are_appended_in_creation_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    for name in ["zeta", "alpha", "mid"] {
        run_wit_command(dir, &["branch", name]).assert().success();
    }

    let names = read_references(dir)
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["HEAD", "master", "zeta", "alpha", "mid"]);
}

#[rstest]
fn creating_a_duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    let before = read_references(dir);

    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("branch feature already exists"));

    assert_eq!(read_references(dir), before);
}

#[rstest]
fn master_cannot_be_created_again(init_repository_dir: TempDir) {
    run_wit_command(init_repository_dir.path(), &["branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[rstest]
#[case("HEAD")]
#[case("None")]
#[case("with space")]
#[case("key=value")]
#[case("a,b")]
#[case("feature/nested")]
fn invalid_branch_names_are_rejected(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir.path();
    let before = read_references(dir);

    run_wit_command(dir, &["branch", name])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid branch name"));

    assert_eq!(read_references(dir), before);
}

#[rstest]
fn branch_before_any_commit_points_nowhere(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();

    run_wit_command(dir, &["branch", "early"]).assert().success();

    assert_eq!(reference(dir, "early"), Some("None".to_string()));
}

#[rstest]
fn branch_stays_put_while_another_branch_is_active(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head(dir);
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();

    let second = commit_file(dir, "a.txt", "world", "second");

    assert_eq!(reference(dir, "feature"), Some(first));
    assert_eq!(reference(dir, "master"), Some(second));
}

#[rstest]
fn branch_without_a_name_is_a_missing_argument(init_repository_dir: TempDir) {
    run_wit_command(init_repository_dir.path(), &["branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing argument"));
}
