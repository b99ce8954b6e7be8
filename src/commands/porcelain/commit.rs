use crate::areas::repository::Repository;
use crate::artifacts::build::tree_builder::TreeBuilder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use std::io::Write;

/// Result of a commit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was stored and HEAD's branch moved to it
    Created(ObjectId),
    /// The staged tree equals HEAD's tree; HEAD is left where it is
    Unchanged(ObjectId),
}

impl CommitOutcome {
    pub fn commit_oid(&self) -> &ObjectId {
        match self {
            CommitOutcome::Created(oid) | CommitOutcome::Unchanged(oid) => oid,
        }
    }
}

impl Repository {
    /// Commit the staged index
    ///
    /// The parent is whatever HEAD resolves to; a repository without commits gets a
    /// root commit. On success the index is cleared. The identity strings are
    /// stored as given.
    pub fn commit(
        &self,
        author: &str,
        committer: &str,
        message: &str,
    ) -> anyhow::Result<CommitOutcome> {
        let mut index = self.index();
        index.rehydrate()?;

        let tree_oids =
            TreeBuilder::new(self.database(), self.workspace()).build(index.entries())?;
        let tree_oid = tree_oids.last().cloned().ok_or(TwigError::NoStagedChanges)?;

        let parent = self.refs().read_head()?;
        if let Some(parent) = &parent {
            let head = self
                .database()
                .parse_object_as_commit(parent)?
                .ok_or_else(|| TwigError::TypeMismatch {
                    name: parent.to_string(),
                    expected: "commit".to_string(),
                })?;

            if head.tree_oid()? == tree_oid {
                writeln!(
                    self.writer(),
                    "nothing changed since {}",
                    parent.to_short_oid()
                )?;
                return Ok(CommitOutcome::Unchanged(parent.clone()));
            }
        }

        let parents = parent.iter().cloned().collect::<Vec<_>>();
        let commit = Commit::new(&tree_oid, &parents, author, committer, message);
        let commit_id = self.database().store(&commit)?;

        self.refs()
            .update_head(&commit_id)
            .context("failed to update HEAD")?;

        index.clear();
        index.write_updates()?;

        let current_ref = self.refs().current_ref()?;
        let branch = current_ref
            .as_ref_path()
            .strip_prefix("refs/heads/")
            .unwrap_or("detached HEAD");
        let root_marker = if parents.is_empty() { "(root-commit) " } else { "" };
        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            branch,
            root_marker,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(CommitOutcome::Created(commit_id))
    }
}
