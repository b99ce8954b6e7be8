use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::TwigError;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Builds and stores the trees for a set of staged files
#[derive(Debug, new)]
pub struct TreeBuilder<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
}

impl<'r> TreeBuilder<'r> {
    /// Store one tree per staged directory, deepest first
    ///
    /// Returns the digests in the order the trees were stored; the last one is the
    /// root tree. Files are re-read from the working tree, and files that no longer
    /// exist are left out.
    pub fn build<'e>(
        &self,
        entries: impl IntoIterator<Item = &'e IndexEntry>,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let files_by_dir = Self::group_by_dir(entries);
        if files_by_dir.is_empty() {
            return Err(TwigError::NoStagedChanges.into());
        }

        let max_depth = files_by_dir.keys().map(|dir| depth(dir)).max().unwrap_or(0);
        let mut subtrees: BTreeMap<PathBuf, Vec<TreeEntry>> = BTreeMap::new();
        let mut tree_oids = Vec::new();

        for level in (0..=max_depth).rev() {
            let mut built = Vec::new();

            for (dir, files) in files_by_dir.iter().filter(|(dir, _)| depth(dir) == level) {
                let mut tree_entries = self.store_blobs(files)?;

                let mut children = subtrees.remove(dir).unwrap_or_default();
                children.sort_by(|a, b| a.name.cmp(&b.name));
                tree_entries.extend(children);

                if tree_entries.is_empty() && level > 0 {
                    tracing::debug!(dir = %dir.display(), "no files left, skipping directory");
                    continue;
                }

                let tree_oid = self.database.store(&Tree::new(tree_entries))?;
                tracing::debug!(dir = %dir.display(), oid = %tree_oid, "stored tree");
                tree_oids.push(tree_oid.clone());

                if level > 0 {
                    let parent = dir.parent().unwrap_or(Path::new("")).to_path_buf();
                    let name = dir
                        .file_name()
                        .and_then(|name| name.to_str())
                        .with_context(|| format!("invalid directory name {}", dir.display()))?;
                    built.push((
                        parent,
                        TreeEntry::new(EntryMode::Directory, name.to_string(), tree_oid),
                    ));
                }
            }

            for (parent, entry) in built {
                subtrees.entry(parent).or_default().push(entry);
            }
        }

        Ok(tree_oids)
    }

    /// Staged files keyed by directory, with every ancestor directory present
    fn group_by_dir<'e>(
        entries: impl IntoIterator<Item = &'e IndexEntry>,
    ) -> BTreeMap<PathBuf, Vec<&'e IndexEntry>> {
        let mut files_by_dir: BTreeMap<PathBuf, Vec<&'e IndexEntry>> = BTreeMap::new();

        for entry in entries {
            let dir = entry.parent_dir();
            for ancestor in dir.ancestors() {
                files_by_dir.entry(ancestor.to_path_buf()).or_default();
            }
            files_by_dir.entry(dir.to_path_buf()).or_default().push(entry);
        }

        files_by_dir
    }

    fn store_blobs(&self, files: &[&IndexEntry]) -> anyhow::Result<Vec<TreeEntry>> {
        let mut files = files.to_vec();
        files.sort_by(|a, b| a.name.file_name().cmp(&b.name.file_name()));

        let mut tree_entries = Vec::with_capacity(files.len());
        for file in files {
            let Some(content) = self.workspace.try_read_file(&file.name)? else {
                tracing::debug!(path = %file.name.display(), "staged file is gone, skipping");
                continue;
            };

            let mode = self.workspace.stat_mode(&file.name)?;
            let oid = self.database.store(&Blob::new(content))?;
            tree_entries.push(TreeEntry::new(mode, file.basename()?.to_string(), oid));
        }

        Ok(tree_entries)
    }
}

/// Number of components; the repository root has depth 0
fn depth(dir: &Path) -> usize {
    dir.components().count()
}
