use crate::common::command::{
    cat_file, committed_repository_dir, head_commit_sha, init_repository_dir, repository_dir,
    run_twig_command,
};
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn stored_blob_prints_its_content(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    init_repository_dir.child("note.txt").write_str(&content)?;

    let output = run_twig_command(init_repository_dir.path(), &["hash-object", "-w", "note.txt"])
        .output()?;
    let blob_sha = String::from_utf8(output.stdout)?.trim().to_string();

    assert_eq!(cat_file(init_repository_dir.path(), "blob", &blob_sha)?, content);
    assert_eq!(
        cat_file(init_repository_dir.path(), "blob", &blob_sha[..6])?,
        content
    );

    Ok(())
}

#[rstest]
fn tree_of_head_lists_its_entries(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = cat_file(committed_repository_dir.path(), "tree", "HEAD")?;
    let lines = listing.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("100644 blob "));
    assert!(lines[0].ends_with("\t1.txt"));
    assert!(lines[1].starts_with("40000 tree "));
    assert!(lines[1].ends_with("\ta"));

    Ok(())
}

#[rstest]
fn commit_is_printed_as_its_payload(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head = head_commit_sha(committed_repository_dir.path())?;

    let payload = cat_file(committed_repository_dir.path(), "commit", "master")?;

    assert!(payload.starts_with("tree "));
    assert!(payload.contains("author fake_user 1672574400 +0000\n"));
    assert!(payload.ends_with("\n\nInitial commit\n"));
    assert_eq!(cat_file(committed_repository_dir.path(), "commit", &head)?, payload);

    Ok(())
}

#[rstest]
fn blob_requested_as_commit_is_a_lookup_error(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("hello.txt").write_str("hello\n")?;
    run_twig_command(init_repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success();

    run_twig_command(
        init_repository_dir.path(),
        &["cat-file", "commit", "ce013625030ba8dba906f756967f9e9ca394464a"],
    )
    .assert()
    .code(128)
    .stderr(predicate::str::contains("does not name a commit"));

    Ok(())
}

#[rstest]
fn unknown_object_is_not_found(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["cat-file", "blob", "deadbeef"])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("no such reference deadbeef"));
}

#[rstest]
fn cat_file_needs_a_repository(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["cat-file", "blob", "HEAD"])
        .assert()
        .code(128);
}
