//! Object types and codecs
//!
//! Every piece of content is an immutable object identified by the SHA-1 digest of
//! its framed serialization `<type> <size>\0<payload>`:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: directory listing (modes, names and object IDs)
//! - **Commit**: root tree, parents, identities and message (KVLM payload)
//! - **Tag**: annotated pointer to another object (KVLM payload)
//!
//! Objects only produce and consume their payload; framing is done in [`object::Object`].

pub mod blob;
pub mod commit;
pub mod kvlm;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tag;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = 20;
