//! Staged index file format
//!
//! The index (staging area) records which files go into the next commit. It is a
//! plain text file with one entry per line:
//!
//! ```text
//! <40-hex-digest> <repository-relative-path>\n
//! ```

pub mod entry_mode;
pub mod index_entry;
