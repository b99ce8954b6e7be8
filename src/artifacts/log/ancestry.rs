use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::collections::{HashSet, VecDeque};

/// One step of an ancestry walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AncestryStep {
    /// `child` lists `parent` among its parents
    Edge { child: ObjectId, parent: ObjectId },
    /// A commit without parents
    Root(ObjectId),
}

/// Depth-first walk over the commits reachable from a start commit
///
/// Every commit is loaded at most once, however many paths lead to it. For each
/// loaded commit the walk yields one [`AncestryStep::Edge`] per parent, or a single
/// [`AncestryStep::Root`] if it has none. First parents are explored first.
pub struct Ancestry<'r> {
    database: &'r Database,
    stack: Vec<ObjectId>,
    visited: HashSet<ObjectId>,
    pending: VecDeque<AncestryStep>,
}

impl<'r> Ancestry<'r> {
    pub fn new(database: &'r Database, start: ObjectId) -> Self {
        Ancestry {
            database,
            stack: vec![start],
            visited: HashSet::new(),
            pending: VecDeque::new(),
        }
    }

    /// Commits loaded so far
    pub fn visited(&self) -> &HashSet<ObjectId> {
        &self.visited
    }

    fn expand(&mut self, oid: ObjectId) -> anyhow::Result<()> {
        let commit = self.database.parse_object_as_commit(&oid)?.ok_or_else(|| {
            TwigError::TypeMismatch {
                name: oid.to_string(),
                expected: "commit".to_string(),
            }
        })?;

        let parents = commit.parents()?;
        tracing::trace!(oid = %oid, parents = parents.len(), "visiting commit");

        if parents.is_empty() {
            self.pending.push_back(AncestryStep::Root(oid));
            return Ok(());
        }

        for parent in parents.iter().rev() {
            if !self.visited.contains(parent) {
                self.stack.push(parent.clone());
            }
        }
        for parent in parents {
            self.pending.push_back(AncestryStep::Edge {
                child: oid.clone(),
                parent,
            });
        }

        Ok(())
    }
}

impl Iterator for Ancestry<'_> {
    type Item = anyhow::Result<AncestryStep>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                return Some(Ok(step));
            }

            let oid = self.stack.pop()?;
            if !self.visited.insert(oid.clone()) {
                continue;
            }

            if let Err(error) = self.expand(oid) {
                self.stack.clear();
                return Some(Err(error));
            }
        }
    }
}
