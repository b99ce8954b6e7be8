use crate::common::command::{
    cat_file, committed_repository_dir, head_commit_sha, init_repository_dir, run_twig_command,
    twig_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn first_commit_is_a_root_commit(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("a.txt"), "a".to_string()));
    run_twig_command(root, &["add", "-a"]).assert().success();

    twig_commit(root, "first")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[master \(root-commit\) [0-9a-f]{7}\] first\n$")?);

    let head = head_commit_sha(root)?;
    assert_eq!(head.len(), 40);
    assert!(!cat_file(root, "commit", &head)?.contains("parent "));
    assert_eq!(std::fs::read_to_string(root.join(".twig/index"))?, "");

    Ok(())
}

#[rstest]
fn second_commit_points_at_the_first(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = committed_repository_dir.path();
    let first = head_commit_sha(root)?;
    write_file(FileSpec::new(root.join("1.txt"), "changed".to_string()));
    run_twig_command(root, &["add", "-a"]).assert().success();

    twig_commit(root, "second")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[master "));

    let second = head_commit_sha(root)?;
    assert_ne!(first, second);
    assert!(cat_file(root, "commit", &second)?.contains(&format!("parent {first}\n")));

    Ok(())
}

#[rstest]
fn recommitting_the_same_tree_changes_nothing(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = committed_repository_dir.path();
    let before = head_commit_sha(root)?;
    run_twig_command(root, &["add", "-a"]).assert().success();

    twig_commit(root, "again")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing changed"));

    assert_eq!(head_commit_sha(root)?, before);

    Ok(())
}

#[rstest]
fn committing_an_empty_index_fails(init_repository_dir: TempDir) {
    twig_commit(init_repository_dir.path(), "empty")
        .assert()
        .code(128)
        .stderr(predicate::str::contains("nothing staged"));
}

#[rstest]
fn index_is_cleared_after_commit(
    committed_repository_dir: TempDir,
) {
    twig_commit(committed_repository_dir.path(), "nothing staged")
        .assert()
        .code(128);
}

#[rstest]
fn deleted_staged_file_is_left_out(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("keep.txt"), "keep".to_string()));
    write_file(FileSpec::new(root.join("drop.txt"), "drop".to_string()));
    run_twig_command(root, &["add", "-a"]).assert().success();
    std::fs::remove_file(root.join("drop.txt"))?;

    twig_commit(root, "partial").assert().success();

    let listing = cat_file(root, "tree", "HEAD")?;
    assert_eq!(listing.lines().count(), 1);
    assert!(listing.contains("\tkeep.txt"));

    Ok(())
}

#[rstest]
fn invalid_author_date_is_reported(
    init_repository_dir: TempDir,
) {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("a.txt"), "a".to_string()));
    run_twig_command(root, &["add", "-a"]).assert().success();

    twig_commit(root, "dated")
        .env("TWIG_AUTHOR_DATE", "yesterday")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TWIG_AUTHOR_DATE"));
}
