//! Content-addressable object database
//!
//! Objects are framed as `<type> <size>\0<payload>`, hashed with SHA-1, zlib
//! compressed and stored under `objects/<first 2 hex>/<remaining 38 hex>`.
//! Writes go to a temporary file in the bucket and are renamed into place.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, StoredObject};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Compute the digest of an object and, if `persist` is set, store it
    ///
    /// The digest is returned whether or not anything was written.
    pub fn hash_object(&self, object: &impl Object, persist: bool) -> anyhow::Result<ObjectId> {
        let framed = object.frame()?;
        let object_id = digest(&framed)?;

        if persist {
            self.write_framed(&object_id, framed)?;
        }

        Ok(object_id)
    }

    /// Persist an object and return its digest
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.hash_object(object, true)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    /// Read, validate and decode an object
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<StoredObject> {
        let (object_type, payload) = self.load_raw(object_id)?;

        StoredObject::decode(object_type, payload).map_err(|error| {
            match error.downcast::<TwigError>() {
                Ok(TwigError::Format(reason)) => TwigError::MalformedObject {
                    oid: object_id.to_string(),
                    reason,
                }
                .into(),
                Ok(other) => other.into(),
                Err(error) => error,
            }
        })
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        match self.load(object_id)? {
            StoredObject::Blob(blob) => Ok(Some(blob)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tree>> {
        match self.load(object_id)? {
            StoredObject::Tree(tree) => Ok(Some(tree)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        match self.load(object_id)? {
            StoredObject::Commit(commit) => Ok(Some(commit)),
            _ => Ok(None),
        }
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        Ok(self.load_raw(object_id)?.0)
    }

    /// Decompress an object file and split its frame
    ///
    /// Fails with `MalformedObject` when the header is unreadable or the declared
    /// length disagrees with the bytes that follow it.
    fn load_raw(&self, object_id: &ObjectId) -> anyhow::Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.exists() {
            return Err(TwigError::NotFound(object_id.to_string()).into());
        }

        let raw = self.read_object(object_path)?;
        let malformed = |reason: &str| TwigError::MalformedObject {
            oid: object_id.to_string(),
            reason: reason.to_string(),
        };

        let space = raw
            .iter()
            .position(|&byte| byte == b' ')
            .ok_or_else(|| malformed("missing type terminator"))?;
        let object_type = ObjectType::try_from(&raw[..space])?;

        let nul = raw[space..]
            .iter()
            .position(|&byte| byte == 0)
            .map(|offset| space + offset)
            .ok_or_else(|| malformed("missing size terminator"))?;
        let size = std::str::from_utf8(&raw[space + 1..nul])
            .ok()
            .and_then(|size| size.parse::<usize>().ok())
            .ok_or_else(|| malformed("bad length"))?;

        let payload = raw.slice(nul + 1..);
        if size != payload.len() {
            return Err(malformed("bad length").into());
        }

        Ok((object_type, payload))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_framed(&self, object_id: &ObjectId, framed: Bytes) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(());
        }

        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let object_content = Self::compress(framed)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        tracing::debug!(oid = %object_id, "stored object");
        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all stored objects whose digest starts with `prefix`
    ///
    /// Only the bucket named by the first two characters is scanned, so `prefix`
    /// must be at least two lowercase hex characters long.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();
        if prefix.len() < 2 {
            return Ok(matches);
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let file_name = entry.file_name();
                let file_name_str = file_name.to_string_lossy();

                if file_name_str.starts_with(file_prefix) {
                    // temporary files never parse as digests
                    if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name_str}")) {
                        matches.push(oid);
                    }
                }
            }
        }

        matches.sort();
        Ok(matches)
    }
}

fn digest(content: &[u8]) -> anyhow::Result<ObjectId> {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(content);
    ObjectId::from_digest(&hasher.finalize())
}
