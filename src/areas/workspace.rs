use crate::METADATA_DIR;
use crate::artifacts::index::entry_mode::EntryMode;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [METADATA_DIR, ".", ".."];

/// Working tree rooted at the repository path
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List repository-relative paths of all files under `root_file_path`
    ///
    /// Defaults to the whole working tree. The metadata directory is skipped. A
    /// path naming a single file yields just that file.
    pub fn list_files(&self, root_file_path: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => std::fs::canonicalize(self.path.join(p))
                .with_context(|| format!("pathspec {:?} did not match any files", p))?,
            None => self.path.to_path_buf(),
        };

        if !root_file_path.starts_with(&self.path) {
            anyhow::bail!(
                "{:?} is outside repository at {:?}",
                root_file_path,
                self.path
            );
        }

        if root_file_path.is_dir() {
            let mut files = WalkDir::new(&root_file_path)
                .into_iter()
                .filter_entry(|entry| !Self::is_ignored(entry.path()))
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .filter_map(|entry| self.relative_path(entry.path()))
                .collect::<Vec<_>>();
            files.sort();
            Ok(files)
        } else {
            Ok(self.relative_path(&root_file_path).into_iter().collect())
        }
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(self.path.as_ref())
            .ok()
            .map(Path::to_path_buf)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("failed to read {}", file_path.display()))?;

        Ok(content.into())
    }

    /// Read a file that may have disappeared since it was staged
    ///
    /// Returns `None` when the path no longer exists or no longer holds a regular
    /// file (replaced by a directory, for instance).
    pub fn try_read_file(&self, file_path: &Path) -> anyhow::Result<Option<Bytes>> {
        let full_path = self.path.join(file_path);
        match std::fs::metadata(&full_path) {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Ok(None),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to stat {}", file_path.display()));
            }
        }

        match std::fs::read(&full_path) {
            Ok(content) => Ok(Some(content.into())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error)
                .with_context(|| format!("failed to read {}", file_path.display())),
        }
    }

    pub fn stat_mode(&self, file_path: &Path) -> anyhow::Result<EntryMode> {
        let file_path = self.path.join(file_path);
        let metadata = std::fs::metadata(&file_path)
            .with_context(|| format!("failed to stat {}", file_path.display()))?;

        Ok(EntryMode::from_metadata(&file_path, &metadata))
    }
}
