//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings computed over an
//! object's framed serialization. They are the only way one object refers to another.
//!
//! ## Storage
//!
//! Objects are stored in `.twig/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_BYTES, OBJECT_ID_LENGTH};
use crate::errors::TwigError;
use std::io;
use std::path::PathBuf;

/// Content digest of a framed object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID
    ///
    /// Accepts exactly 40 hexadecimal characters; upper-case digits are folded to lower-case.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(TwigError::Format(format!("invalid object ID length: {}", id.len())).into());
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TwigError::Format(format!("invalid object ID characters: {id}")).into());
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a finished SHA-1 digest
    pub fn from_digest(digest: &[u8]) -> anyhow::Result<Self> {
        Self::try_parse(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Write the object ID in its 20-byte raw form
    ///
    /// Used when serializing tree entries.
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex40 = self.as_ref();

        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object ID from its 20-byte raw form
    ///
    /// Every byte renders as two hex digits, so leading zero bytes are kept and
    /// the result is always 40 characters long.
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_BYTES];
        reader.read_exact(&mut raw)?;

        Self::from_digest(&raw)
    }

    /// Convert to the bucketed storage path `XX/YYYY...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the digest
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
