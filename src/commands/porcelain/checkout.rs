use crate::areas::repository::Repository;
use crate::artifacts::checkout::materializer::Materializer;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision::Revision;
use std::path::Path;

impl Repository {
    /// Write the tree of the commit or tree `name` into `destination`
    pub fn checkout(&self, name: &str, destination: &Path) -> anyhow::Result<()> {
        let tree_oid =
            Revision::new(name.to_string()).find(self, Some(ObjectType::Tree), true)?;

        tracing::debug!(tree = %tree_oid, destination = %destination.display(), "checking out");
        Materializer::new(self.database()).materialize(&tree_oid, destination)
    }
}
