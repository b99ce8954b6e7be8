//! Commit object
//!
//! Commits are KVLM payloads. They hold:
//! - `tree`: the root tree digest (required)
//! - `parent`: zero or more parent commit digests
//! - `author` / `committer`: free-form identity strings
//! - the commit message
//!
//! A commit without `parent` is a root commit.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <identity>
//! committer <identity>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use bytes::Bytes;
use std::io::BufRead;

/// Environment variable overriding the timestamp stamped on signatures
pub const AUTHOR_DATE_ENV: &str = "TWIG_AUTHOR_DATE";

/// Identity stamped with a point in time
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Signature {
    identity: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Signature {
    pub fn new(identity: String, timestamp: chrono::DateTime<chrono::FixedOffset>) -> Self {
        Signature {
            identity,
            timestamp,
        }
    }

    pub fn now(identity: String) -> Self {
        Self::new(identity, chrono::Local::now().fixed_offset())
    }

    /// Stamp `identity` with the time in `TWIG_AUTHOR_DATE`, or now if it is unset
    ///
    /// Accepts RFC 2822 dates and `%Y-%m-%d %H:%M:%S %z`.
    pub fn load_from_env(identity: String) -> anyhow::Result<Self> {
        match std::env::var(AUTHOR_DATE_ENV) {
            Ok(date_str) => {
                let timestamp = chrono::DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| {
                        chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z")
                    })
                    .map_err(|_| anyhow::anyhow!("invalid {AUTHOR_DATE_ENV}: {date_str}"))?;
                Ok(Self::new(identity, timestamp))
            }
            Err(_) => Ok(Self::now(identity)),
        }
    }

    /// `<identity> <unix-seconds> <±hhmm>`
    pub fn display(&self) -> String {
        format!(
            "{} {} {}",
            self.identity,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    kvlm: Kvlm,
}

impl Commit {
    /// Build a commit; `parents` may be empty for a root commit
    pub fn new(
        tree_oid: &ObjectId,
        parents: &[ObjectId],
        author: &str,
        committer: &str,
        message: &str,
    ) -> Self {
        let mut kvlm = Kvlm::default();

        kvlm.push("tree", tree_oid.to_string());
        for parent in parents {
            kvlm.push("parent", parent.to_string());
        }
        kvlm.push("author", author.to_string());
        kvlm.push("committer", committer.to_string());
        kvlm.set_message(message.to_string());

        Commit { kvlm }
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    pub fn tree_oid(&self) -> anyhow::Result<ObjectId> {
        let tree = self
            .kvlm
            .get(b"tree")
            .ok_or_else(|| TwigError::Format("commit without tree".into()))?;

        parse_oid(tree)
    }

    pub fn parents(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.kvlm.get_all(b"parent").iter().map(parse_oid).collect()
    }

    pub fn is_root(&self) -> bool {
        !self.kvlm.contains_key(b"parent")
    }

    pub fn author(&self) -> Option<String> {
        self.kvlm
            .get(b"author")
            .map(|author| String::from_utf8_lossy(author).into_owned())
    }

    pub fn committer(&self) -> Option<String> {
        self.kvlm
            .get(b"committer")
            .map(|committer| String::from_utf8_lossy(committer).into_owned())
    }

    pub fn message(&self) -> String {
        String::from_utf8_lossy(self.kvlm.message()).into_owned()
    }

    /// First line of the message
    pub fn short_message(&self) -> String {
        self.message().lines().next().unwrap_or("").to_string()
    }
}

pub(crate) fn parse_oid(value: &Bytes) -> anyhow::Result<ObjectId> {
    let value = std::str::from_utf8(value)
        .map_err(|_| TwigError::Format("object reference is not ASCII".into()))?;

    ObjectId::try_parse(value.to_string())
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.kvlm.serialize())
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Commit {
            kvlm: Kvlm::parse(&content)?,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.kvlm.serialize()).into_owned()
    }
}
