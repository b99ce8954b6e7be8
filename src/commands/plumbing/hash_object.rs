use crate::areas::repository::Repository;
use crate::artifacts::objects::object::StoredObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the digest `object_path` would have as an object of `object_type`
    ///
    /// The file is decoded as that type first, so malformed trees, commits and tags
    /// are rejected. With `write` set the object is also stored.
    pub fn hash_object(
        &self,
        object_path: &Path,
        object_type: ObjectType,
        write: bool,
    ) -> anyhow::Result<ObjectId> {
        let data = std::fs::read(object_path)
            .with_context(|| format!("failed to read {}", object_path.display()))?;

        let object = StoredObject::decode(object_type, data.into())?;
        let object_id = self.database().hash_object(&object, write)?;

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}
