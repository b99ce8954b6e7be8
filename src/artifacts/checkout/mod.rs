//! Tree materialization
//!
//! Checkout writes the files of a tree into a fresh or empty directory:
//!
//! 1. Tree entries become subdirectories and are expanded recursively
//! 2. Blob entries become files holding the blob content verbatim
//! 3. Any other object type in a tree is a format error
//!
//! Nothing is ever merged into an existing, non-empty directory.

pub mod materializer;
