use crate::common::command::{
    committed_repository_dir, head_commit_sha, init_repository_dir, run_twig_command, twig_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_without_commits(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout("no commits yet\n");
}

#[rstest]
fn log_of_a_single_commit_marks_the_root(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head = head_commit_sha(committed_repository_dir.path())?;

    let expected = format!(
        "digraph twiglog {{\n  node [shape=box];\n  c_{head} [label=\"{} (root)\"];\n}}\n",
        &head[..7]
    );
    run_twig_command(committed_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(expected);

    Ok(())
}

#[rstest]
fn log_of_linear_history_lists_every_edge(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = committed_repository_dir.path();
    let mut shas = vec![head_commit_sha(root)?];
    for i in 0..2 {
        write_file(FileSpec::new(root.join("1.txt"), format!("revision {i}")));
        run_twig_command(root, &["add", "-a"]).assert().success();
        twig_commit(root, &format!("commit {i}")).assert().success();
        shas.push(head_commit_sha(root)?);
    }

    let output = run_twig_command(root, &["log", "@"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let edges = stdout
        .lines()
        .filter(|line| line.contains(" -> "))
        .map(str::trim)
        .collect::<Vec<_>>();

    assert_eq!(
        edges,
        vec![
            format!("c_{} -> c_{};", shas[2], shas[1]),
            format!("c_{} -> c_{};", shas[1], shas[0]),
        ]
    );
    assert!(stdout.contains(&format!("c_{} [label=", shas[0])));

    Ok(())
}

#[rstest]
fn log_from_an_unknown_revision_fails(committed_repository_dir: TempDir) {
    run_twig_command(committed_repository_dir.path(), &["log", "nope"])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("no such reference nope"));
}
