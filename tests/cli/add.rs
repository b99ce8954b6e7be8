use crate::common::command::{init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn index_paths(dir: &std::path::Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let index = std::fs::read_to_string(dir.join(".twig").join("index"))?;

    Ok(index
        .lines()
        .map(|line| {
            let (oid, path) = line.split_once(' ').expect("index line has a digest");
            assert_eq!(oid.len(), 40);
            path.to_string()
        })
        .collect())
}

#[rstest]
fn add_all_stages_nested_files(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let root = init_repository_dir.path();
    let mut expected = write_generated_files(root, 3)
        .into_iter()
        .map(|spec| spec.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    write_file(FileSpec::new(root.join("sub/inner.txt"), "inner".to_string()));
    expected.push("sub/inner.txt".to_string());
    expected.sort();

    run_twig_command(root, &["add", "-a"]).assert().success();

    assert_eq!(index_paths(root)?, expected);

    Ok(())
}

#[rstest]
fn add_path_stages_only_that_directory(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("top.txt"), "top".to_string()));
    write_file(FileSpec::new(root.join("sub/one.txt"), "one".to_string()));
    write_file(FileSpec::new(root.join("sub/deeper/two.txt"), "two".to_string()));

    run_twig_command(root, &["add", "--path", "sub"]).assert().success();

    assert_eq!(index_paths(root)?, vec!["sub/deeper/two.txt", "sub/one.txt"]);

    Ok(())
}

#[rstest]
fn paths_with_spaces_are_staged_whole(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("my notes.txt"), "n".to_string()));

    run_twig_command(root, &["add", "--path", "my notes.txt"]).assert().success();

    assert_eq!(index_paths(root)?, vec!["my notes.txt"]);

    Ok(())
}

#[rstest]
fn restaging_keeps_one_entry_per_path(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("a.txt"), "first".to_string()));
    run_twig_command(root, &["add", "-a"]).assert().success();
    write_file(FileSpec::new(root.join("a.txt"), "second".to_string()));
    run_twig_command(root, &["add", "--path", "a.txt"]).assert().success();

    assert_eq!(index_paths(root)?, vec!["a.txt"]);

    Ok(())
}

#[rstest]
fn adding_a_missing_path_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "--path", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not match any files"));
}

#[rstest]
fn add_requires_a_target(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add"])
        .assert()
        .failure();
}
