//! Error taxonomy
//!
//! Every failure the core can detect is a [`TwigError`]. Functions still return
//! `anyhow::Result`, so callers recover the kind with `downcast_ref::<TwigError>()`.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Broad category of a [`TwigError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed object frame or payload
    Format,
    /// Name does not resolve, or resolves ambiguously
    Lookup,
    /// Operation refused because its preconditions do not hold
    Precondition,
}

#[derive(Debug, thiserror::Error)]
pub enum TwigError {
    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: String, reason: String },

    #[error("unknown object type {0}")]
    UnknownObjectType(String),

    #[error("invalid format: {0}")]
    Format(String),

    #[error("tree entry {name} points to a {object_type}, expected a tree or a blob")]
    InvalidTreeEntry { name: String, object_type: String },

    #[error("no such reference {0}")]
    NotFound(String),

    #[error("ambiguous reference {name}: candidates are:\n - {}", format_candidates(.candidates))]
    Ambiguous {
        name: String,
        candidates: Vec<ObjectId>,
    },

    #[error("{name} does not name a {expected}")]
    TypeMismatch { name: String, expected: String },

    #[error("symbolic ref cycle through {0}")]
    RefCycle(String),

    #[error("{} is not empty", .0.display())]
    DirectoryNotEmpty(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("nothing staged: add files to the index before committing")]
    NoStagedChanges,

    #[error("not a twig repository (or any of the parent directories): {}", .0.display())]
    RepositoryNotFound(PathBuf),

    #[error("unsupported repository format version {0}")]
    UnsupportedVersion(u32),
}

impl TwigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TwigError::MalformedObject { .. }
            | TwigError::UnknownObjectType(_)
            | TwigError::Format(_)
            | TwigError::InvalidTreeEntry { .. } => ErrorKind::Format,
            TwigError::NotFound(_)
            | TwigError::Ambiguous { .. }
            | TwigError::TypeMismatch { .. }
            | TwigError::RefCycle(_) => ErrorKind::Lookup,
            TwigError::DirectoryNotEmpty(_)
            | TwigError::NotADirectory(_)
            | TwigError::NoStagedChanges
            | TwigError::RepositoryNotFound(_)
            | TwigError::UnsupportedVersion(_) => ErrorKind::Precondition,
        }
    }

    /// Kind of the [`TwigError`] carried by an `anyhow` error, if any
    pub fn kind_of(error: &anyhow::Error) -> Option<ErrorKind> {
        error.downcast_ref::<TwigError>().map(TwigError::kind)
    }
}

fn format_candidates(candidates: &[ObjectId]) -> String {
    candidates
        .iter()
        .map(|oid| oid.as_ref())
        .collect::<Vec<_>>()
        .join("\n - ")
}
