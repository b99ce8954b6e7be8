//! Commit history traversal
//!
//! [`ancestry::Ancestry`] walks the parent links of a commit graph, which may
//! contain merges, visiting each commit once.

pub mod ancestry;
