use crate::areas::config::RepositoryConfig;
use crate::areas::repository::Repository;
use crate::areas::refs::DEFAULT_BRANCH;
use crate::errors::TwigError;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

impl Repository {
    /// Create the metadata skeleton: object store, refs, HEAD, description and config
    ///
    /// Refuses to touch an existing, non-empty metadata directory.
    pub fn init(&self) -> anyhow::Result<()> {
        let metadata_path = self.metadata_path();
        if metadata_path.exists() {
            if !metadata_path.is_dir() {
                return Err(TwigError::NotADirectory(metadata_path.to_path_buf()).into());
            }
            if fs::read_dir(&metadata_path)?.next().is_some() {
                return Err(TwigError::DirectoryNotEmpty(metadata_path.to_path_buf()).into());
            }
        }

        fs::create_dir_all(self.database().objects_path())
            .context("failed to create objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("failed to create refs/heads directory")?;
        fs::create_dir_all(self.refs().tags_path())
            .context("failed to create refs/tags directory")?;

        fs::write(metadata_path.join("description"), DESCRIPTION)
            .context("failed to write description")?;

        self.refs()
            .set_head_to_branch(DEFAULT_BRANCH)
            .context("failed to create initial HEAD reference")?;

        RepositoryConfig::default().save(&self.config_path())?;

        tracing::info!(path = %metadata_path.display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            metadata_path.display()
        )?;

        Ok(())
    }
}
