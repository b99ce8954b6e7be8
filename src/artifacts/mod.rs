//! Object model and the algorithms built on it
//!
//! - `build`: staged index to nested tree objects
//! - `checkout`: tree materialization into a directory
//! - `core`: output helpers (pager)
//! - `index`: index file entries and modes
//! - `log`: ancestry traversal
//! - `objects`: object types and codecs
//! - `revision`: name and short-digest resolution

pub mod build;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod objects;
pub mod revision;
