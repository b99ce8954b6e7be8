use crate::common::command::{committed_repository_dir, head_commit_sha, run_twig_command};
use crate::common::file::read_tree;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;

fn committed_files() -> Vec<(PathBuf, String)> {
    vec![
        (PathBuf::from("1.txt"), "one".to_string()),
        (PathBuf::from("a/2.txt"), "two".to_string()),
        (PathBuf::from("a/b/3.txt"), "three".to_string()),
    ]
}

#[rstest]
fn checkout_head_into_a_new_directory(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let destination = TempDir::new()?;
    let target = destination.path().join("out");

    run_twig_command(
        committed_repository_dir.path(),
        &["checkout", "HEAD", target.to_str().unwrap()],
    )
    .assert()
    .success();

    assert_eq!(read_tree(&target), committed_files());

    Ok(())
}

#[rstest]
fn checkout_by_short_commit_into_an_empty_directory(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head = head_commit_sha(committed_repository_dir.path())?;
    let destination = TempDir::new()?;

    run_twig_command(
        committed_repository_dir.path(),
        &["checkout", &head[..8], destination.path().to_str().unwrap()],
    )
    .assert()
    .success();

    assert_eq!(read_tree(destination.path()), committed_files());

    Ok(())
}

#[rstest]
fn checkout_into_a_non_empty_directory_fails(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let destination = TempDir::new()?;
    std::fs::write(destination.path().join("mine.txt"), "mine")?;

    run_twig_command(
        committed_repository_dir.path(),
        &["checkout", "master", destination.path().to_str().unwrap()],
    )
    .assert()
    .code(128)
    .stderr(predicate::str::contains("is not empty"));

    assert_eq!(
        read_tree(destination.path()),
        vec![(PathBuf::from("mine.txt"), "mine".to_string())]
    );

    Ok(())
}

#[rstest]
fn checkout_of_an_unknown_commit_fails(committed_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let destination = TempDir::new()?;

    run_twig_command(
        committed_repository_dir.path(),
        &["checkout", "no-such-branch", destination.path().to_str().unwrap()],
    )
    .assert()
    .code(128)
    .stderr(predicate::str::contains("no such reference"));

    Ok(())
}
