//! Staged index
//!
//! The index tracks which file contents go into the next commit: a mapping from
//! repository-relative path to the digest of the blob staged for it. It is kept in
//! memory as a path-ordered map and persisted as one `digest path` line per entry.

use crate::artifacts::index::index_entry::IndexEntry;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    /// Staged files mapped by path
    entries: BTreeMap<Box<Path>, IndexEntry>,
    /// Set when the in-memory entries differ from the file
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    /// Load the index from disk, replacing anything held in memory
    ///
    /// A missing or empty file is an empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read index file at {:?}", self.path))?;

        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            let entry = IndexEntry::parse_line(line)?;
            self.entries
                .insert(entry.name.clone().into_boxed_path(), entry);
        }

        tracing::trace!(entries = self.entries.len(), "loaded index");
        Ok(())
    }

    /// Stage an entry, replacing any entry already staged for the same path
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries
            .insert(entry.name.clone().into_boxed_path(), entry);
        self.changed = true;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.changed = true;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Rewrite the whole index file from memory
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("failed to open index file at {:?}", self.path))?;

        for entry in self.entries() {
            writeln!(index_file, "{}", entry.to_line())?;
        }

        self.changed = false;
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn into_entries(self) -> impl Iterator<Item = IndexEntry> {
        self.entries.into_values()
    }
}
