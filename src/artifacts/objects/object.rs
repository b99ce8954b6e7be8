use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Cursor, Write};

/// Produce the payload bytes of an object (without the frame header)
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Rebuild an object from its payload bytes (the frame header is already consumed)
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Frame the payload as `<type> <length>\0<payload>`
    fn frame(&self) -> Result<Bytes> {
        let payload = self.serialize()?;

        let mut framed = Vec::with_capacity(payload.len() + 32);
        write!(framed, "{} {}\0", self.object_type(), payload.len())?;
        framed.write_all(&payload)?;

        Ok(Bytes::from(framed))
    }

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.frame()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        ObjectId::from_digest(&hasher.finalize())
    }
}

/// Any object read back from the database, tagged by its frame type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl StoredObject {
    /// Decode a payload with the decoder selected by `object_type`
    pub fn decode(object_type: ObjectType, payload: Bytes) -> Result<Self> {
        let reader = Cursor::new(payload);

        Ok(match object_type {
            ObjectType::Blob => StoredObject::Blob(Blob::deserialize(reader)?),
            ObjectType::Tree => StoredObject::Tree(Tree::deserialize(reader)?),
            ObjectType::Commit => StoredObject::Commit(Commit::deserialize(reader)?),
            ObjectType::Tag => StoredObject::Tag(Tag::deserialize(reader)?),
        })
    }

    fn as_object(&self) -> &dyn Object {
        match self {
            StoredObject::Blob(blob) => blob,
            StoredObject::Tree(tree) => tree,
            StoredObject::Commit(commit) => commit,
            StoredObject::Tag(tag) => tag,
        }
    }
}

impl Packable for StoredObject {
    fn serialize(&self) -> Result<Bytes> {
        self.as_object().serialize()
    }
}

impl Object for StoredObject {
    fn object_type(&self) -> ObjectType {
        self.as_object().object_type()
    }

    fn display(&self) -> String {
        self.as_object().display()
    }
}
