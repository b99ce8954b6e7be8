use crate::METADATA_DIR;
use crate::areas::config::RepositoryConfig;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::TwigError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Assemble the areas of a repository rooted at `path`
    ///
    /// The directory is created if it does not exist yet. Nothing under the
    /// metadata directory is read or checked; use [`Repository::discover`] to open an
    /// existing repository.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if path.exists() && !path.is_dir() {
            return Err(TwigError::NotADirectory(path.to_path_buf()).into());
        }

        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
        }

        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(metadata_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open the repository containing `start`
    ///
    /// Walks from `start` up through its ancestors until a directory holding a
    /// metadata directory is found, then validates its config.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", start.display()))?;

        let root = start
            .ancestors()
            .find(|candidate| candidate.join(METADATA_DIR).is_dir())
            .ok_or_else(|| TwigError::RepositoryNotFound(start.clone()))?;

        tracing::debug!(root = %root.display(), "found repository");

        let repository = Self::new(root, writer)?;
        RepositoryConfig::load(&repository.config_path())?;

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> Box<Path> {
        self.path.join(METADATA_DIR).into_boxed_path()
    }

    pub fn config_path(&self) -> Box<Path> {
        self.metadata_path().join("config").into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
