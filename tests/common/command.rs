use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Timestamp stamped on every commit made through [`twig_commit`]
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with one commit of `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(root.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(
        root.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_twig_command(root, &["add", "-a"]).assert().success();
    twig_commit(root, "Initial commit").assert().success();

    init_repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("TWIG_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", "fake_user", "fake_user", message]);
    cmd.env("TWIG_AUTHOR_DATE", AUTHOR_DATE);
    cmd
}

/// Digest HEAD currently resolves to
pub fn head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_path = dir.join(".twig").join("HEAD");
    let head_content = std::fs::read_to_string(head_path)?;

    // HEAD holds either a digest or a ref like "ref: refs/heads/master"
    if let Some(ref_path) = head_content.strip_prefix("ref: ") {
        let ref_file = dir.join(".twig").join(ref_path.trim());
        let commit_sha = std::fs::read_to_string(ref_file)?;
        Ok(commit_sha.trim().to_string())
    } else {
        Ok(head_content.trim().to_string())
    }
}

/// Raw payload of an object, printed by `twig cat-file`
pub fn cat_file(dir: &Path, object_type: &str, name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_twig_command(dir, &["cat-file", object_type, name]).output()?;
    if !output.status.success() {
        return Err(String::from_utf8(output.stderr)?.into());
    }

    Ok(String::from_utf8(output.stdout)?)
}
