//! Annotated tag object
//!
//! Same KVLM payload as a commit; the `object` key names the tagged object and
//! `type` its object type.

use crate::artifacts::objects::commit::parse_oid;
use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use bytes::Bytes;
use std::io::BufRead;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    kvlm: Kvlm,
}

impl Tag {
    pub fn new(object: &ObjectId, object_type: ObjectType, name: &str, message: &str) -> Self {
        let mut kvlm = Kvlm::default();

        kvlm.push("object", object.to_string());
        kvlm.push("type", object_type.to_string());
        kvlm.push("tag", name.to_string());
        kvlm.set_message(message.to_string());

        Tag { kvlm }
    }

    /// Digest of the tagged object
    pub fn object_oid(&self) -> anyhow::Result<ObjectId> {
        let object = self
            .kvlm
            .get(b"object")
            .ok_or_else(|| TwigError::Format("tag without object".into()))?;

        parse_oid(object)
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }
}

impl Packable for Tag {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.kvlm.serialize())
    }
}

impl Unpackable for Tag {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Tag {
            kvlm: Kvlm::parse(&content)?,
        })
    }
}

impl Object for Tag {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tag
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.kvlm.serialize()).into_owned()
    }
}
