use crate::common::command::{repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn new_repository_has_the_metadata_skeleton(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata_path = repository_dir.path().canonicalize()?.join(".twig");

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty twig repository in",
        ))
        .stdout(predicate::str::contains(metadata_path.display().to_string()));

    assert_eq!(
        std::fs::read_to_string(metadata_path.join("HEAD"))?,
        "ref: refs/heads/master\n"
    );
    assert!(metadata_path.join("objects").is_dir());
    assert!(metadata_path.join("refs/heads").is_dir());
    assert!(metadata_path.join("refs/tags").is_dir());
    assert!(metadata_path.join("description").is_file());
    assert!(std::fs::read_to_string(metadata_path.join("config"))?.contains("format_version = 0"));

    Ok(())
}

#[rstest]
fn init_creates_a_missing_target_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(repository_dir.path().join("nested/project/.twig/HEAD").is_file());

    Ok(())
}

#[rstest]
fn init_twice_is_refused(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("is not empty"));
}

#[rstest]
fn init_on_a_file_is_refused(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(repository_dir.path().join("plain"), "x")?;

    run_twig_command(repository_dir.path(), &["init", "plain"])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("is not a directory"));

    Ok(())
}

#[rstest]
fn commands_outside_a_repository_fail(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["log"])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("not a twig repository"));
}
