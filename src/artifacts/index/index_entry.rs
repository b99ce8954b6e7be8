//! Index entry representation
//!
//! Each staged file is one line of the index file:
//!
//! ```text
//! <40-hex-digest> <repository-relative-path>
//! ```
//!
//! The line is split at the first space only, so paths may contain spaces.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use derive_new::new;
use std::path::{Path, PathBuf};

/// A staged file and the digest of its blob at staging time
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to the repository root
    pub name: PathBuf,
    /// Digest of the staged blob
    pub oid: ObjectId,
}

impl IndexEntry {
    pub fn basename(&self) -> anyhow::Result<&str> {
        self.name
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name {}", self.name.display()))
    }

    /// Directory containing the entry; the repository root is the empty path
    pub fn parent_dir(&self) -> &Path {
        self.name.parent().unwrap_or(Path::new(""))
    }

    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let (oid, name) = line
            .split_once(' ')
            .ok_or_else(|| TwigError::Format(format!("invalid index line {line:?}")))?;

        if name.is_empty() {
            return Err(TwigError::Format(format!("index line without path {line:?}")).into());
        }

        Ok(Self::new(
            PathBuf::from(name),
            ObjectId::try_parse(oid.to_string())?,
        ))
    }

    /// Check that `path` can be stored as one index line
    ///
    /// The path must be valid UTF-8 and hold no line breaks.
    pub fn validate_path(path: &Path) -> anyhow::Result<()> {
        let name = path.to_str().ok_or_else(|| {
            TwigError::Format(format!("path {} is not valid UTF-8", path.display()))
        })?;
        if name.contains(['\n', '\r']) {
            return Err(TwigError::Format(format!("path {name:?} contains a line break")).into());
        }

        Ok(())
    }

    pub fn to_line(&self) -> String {
        format!("{} {}", self.oid, self.name.display())
    }
}
