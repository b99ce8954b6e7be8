use crate::areas::refs::{HEAD_REF_NAME, REF_ALIASES};
use crate::areas::repository::Repository;
use crate::artifacts::log::ancestry::{Ancestry, AncestryStep};
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision::Revision;
use std::io::Write;

impl Repository {
    /// Print the ancestry of `name` as a graphviz digraph
    ///
    /// One `c_<child> -> c_<parent>;` line per parent link; root commits get a
    /// `root` label.
    pub fn log(&self, name: &str) -> anyhow::Result<()> {
        let is_head = name == HEAD_REF_NAME || REF_ALIASES.get(name) == Some(&HEAD_REF_NAME);
        if is_head && self.refs().read_head()?.is_none() {
            writeln!(self.writer(), "no commits yet")?;
            return Ok(());
        }

        let start = Revision::new(name.to_string()).find(self, Some(ObjectType::Commit), true)?;

        writeln!(self.writer(), "digraph twiglog {{")?;
        writeln!(self.writer(), "  node [shape=box];")?;

        for step in Ancestry::new(self.database(), start) {
            match step? {
                AncestryStep::Edge { child, parent } => {
                    writeln!(self.writer(), "  c_{} -> c_{};", child, parent)?;
                }
                AncestryStep::Root(oid) => {
                    writeln!(
                        self.writer(),
                        "  c_{} [label=\"{} (root)\"];",
                        oid,
                        oid.to_short_oid()
                    )?;
                }
            }
        }

        writeln!(self.writer(), "}}")?;

        Ok(())
    }
}
