//! Plumbing commands
//!
//! Direct access to the object store, mainly for scripting and debugging:
//!
//! - `hash-object`: compute an object ID and optionally store the object
//! - `cat-file`: print an object by digest, short digest or ref name

pub mod cat_file;
pub mod hash_object;
