//! Stateful on-disk areas of a repository
//!
//! - `config`: repository configuration (`.twig/config`)
//! - `database`: content-addressable object store
//! - `index`: staged index
//! - `refs`: HEAD, branches and tags
//! - `repository`: aggregate of the areas, ancestor discovery
//! - `workspace`: working tree reads and enumeration

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
