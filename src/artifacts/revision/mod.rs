//! Name resolution
//!
//! Turns a user-supplied name into an object ID. A name may be:
//! - `HEAD` or its alias `@`
//! - A full 40-character digest (taken as is, without touching the store)
//! - An abbreviated digest of at least 4 hex characters
//! - A ref name looked up in `.twig/`, `refs/`, `refs/heads/` or `refs/tags/`
//!
//! Every interpretation that matches contributes a candidate; a name is usable
//! only if it yields exactly one.

use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::{Object, StoredObject};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use derive_new::new;

/// Shortest abbreviated digest accepted
pub const MIN_SHORT_OID_LENGTH: usize = 4;

#[derive(Debug, Clone, new)]
pub struct Revision {
    name: String,
}

impl Revision {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All object IDs the name could refer to, deduplicated
    pub fn candidates(&self, repository: &Repository) -> anyhow::Result<Vec<ObjectId>> {
        let name = self.name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }

        if name.len() == OBJECT_ID_LENGTH && Self::is_hex(name) {
            return Ok(vec![ObjectId::try_parse(name.to_string())?]);
        }

        let mut candidates = Vec::new();

        if name.len() >= MIN_SHORT_OID_LENGTH && name.len() < OBJECT_ID_LENGTH && Self::is_hex(name)
        {
            candidates.extend(
                repository
                    .database()
                    .find_objects_by_prefix(&name.to_ascii_lowercase())?,
            );
        }

        if let Some(oid) = repository.refs().find_ref(name)? {
            if !candidates.contains(&oid) {
                candidates.push(oid);
            }
        }

        tracing::trace!(name, candidates = candidates.len(), "resolved name");
        Ok(candidates)
    }

    /// Resolve the name to exactly one object ID
    ///
    /// With an `expected` type the object is checked. If `follow` is set, a commit
    /// is followed to its tree when a tree is expected and a tag is followed to
    /// the object it points at. Anything else of the wrong type is a `TypeMismatch`.
    pub fn find(
        &self,
        repository: &Repository,
        expected: Option<ObjectType>,
        follow: bool,
    ) -> anyhow::Result<ObjectId> {
        let mut candidates = self.candidates(repository)?;

        let mut oid = match candidates.len() {
            0 => return Err(TwigError::NotFound(self.name.clone()).into()),
            1 => candidates.remove(0),
            _ => {
                return Err(TwigError::Ambiguous {
                    name: self.name.clone(),
                    candidates,
                }
                .into());
            }
        };

        let Some(expected) = expected else {
            return Ok(oid);
        };

        loop {
            let object = repository.database().load(&oid)?;
            if object.object_type() == expected {
                return Ok(oid);
            }

            oid = match object {
                StoredObject::Commit(commit) if follow && expected == ObjectType::Tree => {
                    commit.tree_oid()?
                }
                StoredObject::Tag(tag) if follow => tag.object_oid()?,
                _ => {
                    return Err(TwigError::TypeMismatch {
                        name: self.name.clone(),
                        expected: expected.to_string(),
                    }
                    .into());
                }
            };
        }
    }

    fn is_hex(name: &str) -> bool {
        name.chars().all(|c| c.is_ascii_hexdigit())
    }
}
