//! Represents an abstract repository.
//!
//! ## Design Goals
//!
//! Repositories may be stored in multiple different mechanisms. The
//! `minigit_on_disk` crate provides local on-disk repositories that use
//! the same `.git` layout as command-line git, but you could envision
//! repositories stored entirely in memory, or in a database.

use log::debug;

use crate::{
    object::{tree, Attribution, Commit, Id, Kind, Object, TreeEntry},
    refs::{self, RefTarget},
    Error, Result,
};

#[cfg(test)]
pub(crate) mod in_memory;

/// Symbolic references are followed at most this many times.
pub const MAX_SYMREF_DEPTH: usize = 5;

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing a repo.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture: storing and
/// fetching objects, and reading and writing references.
///
/// The provided methods build the object-store plumbing (`put`, `get`,
/// `commit`, ...) on top of those primitives, regardless of storage mechanism.
pub trait Repo {
    /// Store an object. If an object with the same ID is already present,
    /// it is left untouched and this succeeds without writing anything.
    fn put_object(&mut self, object: &Object) -> Result<()>;

    /// Fetch an object. Fails with `Error::ObjectNotFound` if it was never stored.
    fn get_object(&self, id: &Id) -> Result<Object>;

    /// Returns true if an object with this ID is stored.
    fn exists(&self, id: &Id) -> Result<bool>;

    /// Read a reference without following symbolic references.
    /// Returns `Ok(None)` if the reference doesn't exist.
    fn read_ref(&self, name: &str) -> Result<Option<RefTarget>>;

    /// Create or overwrite a reference.
    fn write_ref(&mut self, name: &str, target: &RefTarget) -> Result<()>;

    /// Store content as an object of the given kind and return its ID.
    ///
    /// The ID is returned whether or not the object was already present.
    fn put(&mut self, kind: Kind, content: Vec<u8>) -> Result<Id> {
        let object = Object::new(kind, content);
        self.put_object(&object)?;
        Ok(*object.id())
    }

    /// Fetch the kind and content of an object.
    fn get(&self, id: &Id) -> Result<(Kind, Vec<u8>)> {
        let object = self.get_object(id)?;
        Ok((object.kind(), object.into_content()))
    }

    /// Follow a reference (through any symbolic references) to an object ID.
    /// Returns `Ok(None)` if the chain ends at a reference that doesn't exist yet,
    /// as `HEAD` does in a repository with no commits.
    fn resolve_ref(&self, name: &str) -> Result<Option<Id>> {
        let mut name = name.to_string();

        for _ in 0..=MAX_SYMREF_DEPTH {
            match self.read_ref(&name)? {
                None => return Ok(None),
                Some(RefTarget::Direct(id)) => return Ok(Some(id)),
                Some(RefTarget::Symbolic(target)) => name = target,
            }
        }

        Err(Error::RefLoop(name))
    }

    /// Returns the name of the reference that the next commit should advance:
    /// the branch `HEAD` points to, or `HEAD` itself if it is detached.
    fn head_target(&self) -> Result<String> {
        let mut name = refs::HEAD.to_string();

        for _ in 0..=MAX_SYMREF_DEPTH {
            match self.read_ref(&name)? {
                Some(RefTarget::Symbolic(target)) => name = target,
                _ => return Ok(name),
            }
        }

        Err(Error::RefLoop(name))
    }

    /// Record a commit of `tree` and advance a reference to it.
    ///
    /// `author` is used as both author and committer. The reference updated
    /// is `update_ref` if given, otherwise whatever `HEAD` points to.
    /// Neither `tree` nor `parent` is checked for existence.
    fn commit(
        &mut self,
        tree: &Id,
        parent: Option<&Id>,
        author: &Attribution,
        message: &str,
        update_ref: Option<&str>,
    ) -> Result<Id> {
        let commit = Commit::new(*tree, parent.copied(), author.clone(), author.clone(), message);

        let ref_name = match update_ref {
            Some(name) => {
                refs::check_name(name)?;
                name.to_string()
            }
            None => self.head_target()?,
        };

        let id = self.put(Kind::Commit, commit.to_bytes())?;
        self.write_ref(&ref_name, &RefTarget::Direct(id))?;

        debug!("committed {} (tree {}) to {}", id, tree, ref_name);
        Ok(id)
    }

    /// Fetch and parse a commit object.
    fn read_commit(&self, id: &Id) -> Result<Commit> {
        let object = self.get_object(id)?;
        expect_kind(&object, Kind::Commit)?;
        Commit::parse(object.content())
    }

    /// Fetch and decode a tree object.
    fn read_tree(&self, id: &Id) -> Result<Vec<TreeEntry>> {
        let object = self.get_object(id)?;
        expect_kind(&object, Kind::Tree)?;
        tree::decode_entries(object.content())
    }

    /// Given the ID of a tree or a commit, return the ID of the tree.
    fn resolve_tree(&self, id: &Id) -> Result<Id> {
        let object = self.get_object(id)?;

        match object.kind() {
            Kind::Tree => Ok(*id),
            Kind::Commit => Ok(*Commit::parse(object.content())?.tree()),
            Kind::Blob => Err(Error::MalformedObject(format!(
                "{} is a blob, not a tree or commit",
                id
            ))),
        }
    }
}

fn expect_kind(object: &Object, kind: Kind) -> Result<()> {
    if object.kind() == kind {
        Ok(())
    } else {
        Err(Error::MalformedObject(format!(
            "{} is a {}, not a {}",
            object.id(),
            object.kind(),
            kind
        )))
    }
}
