use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, Packable, StoredObject};
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision::Revision;
use std::io::Write;

impl Repository {
    /// Print the object `name` resolves to, as `object_type`
    ///
    /// Trees are listed one entry per line; everything else is printed as its raw
    /// payload.
    pub fn cat_file(&self, object_type: ObjectType, name: &str) -> anyhow::Result<()> {
        let object_id = Revision::new(name.to_string()).find(self, Some(object_type), true)?;
        let object = self.database().load(&object_id)?;

        match object {
            StoredObject::Tree(tree) => {
                let listing = tree.display();
                if !listing.is_empty() {
                    writeln!(self.writer(), "{}", listing)?;
                }
            }
            other => self.writer().write_all(&other.serialize()?)?,
        }

        Ok(())
    }
}
