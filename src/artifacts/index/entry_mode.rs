use crate::errors::TwigError;
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::path::Path;

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

/// Mode recorded for a tree entry
///
/// Modes twig never writes itself (symlinks, submodules) are kept as their
/// octal text so foreign trees re-serialize unchanged.
#[derive(Debug, Clone, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum EntryMode {
    File(FileMode),
    #[default]
    Directory,
    Other(String),
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Directory => "40000",
            EntryMode::Other(mode) => mode.as_str(),
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Parse the octal text stored in a tree entry
    pub fn from_octal_str(value: &str) -> anyhow::Result<Self> {
        match value {
            "100644" => Ok(EntryMode::File(FileMode::Regular)),
            "100755" => Ok(EntryMode::File(FileMode::Executable)),
            "40000" => Ok(EntryMode::Directory),
            _ if !value.is_empty() && value.bytes().all(|b| (b'0'..=b'7').contains(&b)) => {
                Ok(EntryMode::Other(value.to_string()))
            }
            _ => Err(TwigError::Format(format!("invalid entry mode {value:?}")).into()),
        }
    }

    /// Derive the mode from filesystem metadata
    ///
    /// Directories map to `40000`; files map to `100755` when any execute bit is
    /// set and `100644` otherwise.
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            EntryMode::Directory
        } else if path.is_executable() {
            EntryMode::File(FileMode::Executable)
        } else {
            EntryMode::File(FileMode::Regular)
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
