//! Staged index to tree objects
//!
//! The index is flat: one path per staged file. Trees are nested, one per
//! directory, and a directory's tree refers to its children by digest, so the
//! children have to be stored first. [`tree_builder::TreeBuilder`] groups staged
//! files by directory and stores the directories deepest first, handing each
//! finished tree to its parent as a `40000` entry. The root tree comes last.

pub mod tree_builder;
