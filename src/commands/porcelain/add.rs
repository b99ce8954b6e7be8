use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use std::path::Path;

impl Repository {
    /// Stage the files under `path`, or the whole working tree when it is `None`
    ///
    /// Each file is stored as a blob and its index entry replaced. Nothing is
    /// staged when any path cannot be written to the index.
    pub fn add(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let files = self.workspace().list_files(path)?;
        for file in &files {
            IndexEntry::validate_path(file)?;
        }

        let mut index = self.index();
        index.rehydrate()?;

        for file in files {
            let data = self.workspace().read_file(&file)?;
            let blob_id = self.database().store(&Blob::new(data))?;

            tracing::debug!(path = %file.display(), oid = %blob_id, "staged file");
            index.add(IndexEntry::new(file, blob_id));
        }

        index.write_updates()?;

        Ok(())
    }
}
