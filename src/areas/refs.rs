//! References (HEAD, branches, tags)
//!
//! References are human-readable names pointing at objects. They can be:
//! - Direct: containing a 40-character digest
//! - Symbolic: pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## File Format
//!
//! References are plain text files under `.twig/` containing either:
//! - A bare 40-character digest (direct reference)
//! - `ref: <path>` for symbolic references, the path relative to `.twig/`

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use derive_new::new;
use std::collections::HashSet;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Branch HEAD points to in a fresh repository
pub const DEFAULT_BRANCH: &str = "master";

/// Shorthand names accepted wherever a ref name is
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};

/// Name of a reference file, relative to the metadata directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn head() -> Self {
        Self(HEAD_REF_NAME.to_string())
    }

    pub fn is_detached_head(&self) -> bool {
        self.0 == HEAD_REF_NAME
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content of a single reference file
#[derive(Debug, Clone)]
enum SymRefOrOid {
    /// Symbolic reference pointing to another ref
    SymRef { sym_ref_name: SymRefName },
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim_end_matches('\n');

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.twig`)
    path: Box<Path>,
}

impl Refs {
    /// Resolve a ref name to a digest, following symbolic refs transitively
    ///
    /// Returns `None` when the chain ends at a missing or empty ref file, which is
    /// how an unborn branch looks. A chain that revisits a ref fails with `RefCycle`.
    pub fn resolve(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let mut seen = HashSet::new();
        let mut current = SymRefName::new(Self::expand_alias(name).to_string());

        loop {
            if !seen.insert(current.clone()) {
                return Err(TwigError::RefCycle(current.to_string()).into());
            }

            match SymRefOrOid::read_symref_or_oid(&self.path.join(current.as_ref_path()))? {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                    tracing::trace!(from = %current, to = %sym_ref_name, "following symbolic ref");
                    current = sym_ref_name;
                }
                Some(SymRefOrOid::Oid(oid)) => return Ok(Some(oid)),
                None => return Ok(None),
            }
        }
    }

    /// Name of the ref a HEAD update writes to
    ///
    /// Follows symbolic refs from HEAD and returns the last name in the chain, e.g.
    /// `refs/heads/master`, or `HEAD` itself when it is detached.
    pub fn current_ref(&self) -> anyhow::Result<SymRefName> {
        let mut seen = HashSet::new();
        let mut current = SymRefName::head();

        loop {
            if !seen.insert(current.clone()) {
                return Err(TwigError::RefCycle(current.to_string()).into());
            }

            match SymRefOrOid::read_symref_or_oid(&self.path.join(current.as_ref_path()))? {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(SymRefOrOid::Oid(_)) | None => return Ok(current),
            }
        }
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.resolve(HEAD_REF_NAME)
    }

    /// Point the ref HEAD resolves to at `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let target = self.current_ref()?;

        tracing::debug!(target = %target, oid = %oid, "updating ref");
        self.update_ref_file(&self.path.join(target.as_ref_path()), oid.as_ref())
    }

    /// Make HEAD a symbolic ref to `refs/heads/<branch>`
    pub fn set_head_to_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.update_ref_file(
            &self.head_path(),
            &format!("ref: refs/heads/{}\n", branch),
        )
    }

    /// Digest of the ref called `name`
    ///
    /// The name is looked up in `.twig/`, `.twig/refs/`, `.twig/refs/heads/` and
    /// `.twig/refs/tags/`, in that order. Returns `None` if no such ref exists.
    pub fn find_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let name = Self::expand_alias(name);
        if name.is_empty() || name.contains("..") {
            return Ok(None);
        }

        let prefixes = ["", "refs", "refs/heads", "refs/tags"];
        for prefix in prefixes {
            let relative = Path::new(prefix).join(name);
            if self.path.join(&relative).is_file() {
                return self.resolve(&relative.to_string_lossy());
            }
        }

        Ok(None)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        std::fs::write(path, raw_ref)
            .with_context(|| format!("failed to write ref file at {:?}", path))
    }

    fn expand_alias(name: &str) -> &str {
        REF_ALIASES.get(name).copied().unwrap_or(name)
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}
