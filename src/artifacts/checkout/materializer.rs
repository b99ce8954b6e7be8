use crate::areas::database::Database;
use crate::artifacts::index::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object::{Object, StoredObject};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

/// Writes the content of a tree into a directory
#[derive(Debug, new)]
pub struct Materializer<'r> {
    database: &'r Database,
}

impl<'r> Materializer<'r> {
    /// Expand `tree_oid` into `destination`
    ///
    /// `destination` must not exist or be an empty directory; it is never merged into.
    pub fn materialize(&self, tree_oid: &ObjectId, destination: &Path) -> anyhow::Result<()> {
        Self::prepare_destination(destination)?;
        self.write_tree(tree_oid, destination)
    }

    fn prepare_destination(destination: &Path) -> anyhow::Result<()> {
        if !destination.exists() {
            return std::fs::create_dir_all(destination)
                .with_context(|| format!("failed to create {}", destination.display()));
        }

        if !destination.is_dir() {
            return Err(TwigError::NotADirectory(destination.to_path_buf()).into());
        }

        let mut contents = std::fs::read_dir(destination)
            .with_context(|| format!("failed to list {}", destination.display()))?;
        if contents.next().is_some() {
            return Err(TwigError::DirectoryNotEmpty(destination.to_path_buf()).into());
        }

        Ok(())
    }

    fn write_tree(&self, tree_oid: &ObjectId, dir: &Path) -> anyhow::Result<()> {
        let tree = self
            .database
            .parse_object_as_tree(tree_oid)?
            .ok_or_else(|| TwigError::TypeMismatch {
                name: tree_oid.to_string(),
                expected: "tree".to_string(),
            })?;

        for entry in tree.entries() {
            let path = dir.join(&entry.name);

            match self.database.load(&entry.oid)? {
                StoredObject::Tree(_) => {
                    std::fs::create_dir(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    self.write_tree(&entry.oid, &path)?;
                }
                StoredObject::Blob(blob) => {
                    std::fs::write(&path, blob.content())
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    if entry.mode == EntryMode::File(FileMode::Executable) {
                        set_executable(&path)?;
                    }
                    tracing::trace!(path = %path.display(), oid = %entry.oid, "wrote file");
                }
                other => {
                    return Err(TwigError::InvalidTreeEntry {
                        name: entry.name.clone(),
                        object_type: other.object_type().to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .with_context(|| format!("failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}
