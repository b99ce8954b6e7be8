//! twig: a small content-addressable version-control store
//!
//! - `areas`: on-disk state (object database, index, refs, workspace, config)
//! - `artifacts`: object model, codecs and the algorithms built on top of it
//! - `commands`: command implementations on top of [`areas::repository::Repository`]
//! - `errors`: the error taxonomy surfaced to the command layer

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the repository metadata directory
pub const METADATA_DIR: &str = ".twig";
