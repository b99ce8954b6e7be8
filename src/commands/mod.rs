//! Command implementations
//!
//! Every command is a method on [`crate::areas::repository::Repository`] that
//! writes its output to the repository's writer.
//!
//! - `plumbing`: direct object access (hash-object, cat-file)
//! - `porcelain`: the version-control workflow (init, add, commit, checkout, log)

pub mod plumbing;
pub mod porcelain;
