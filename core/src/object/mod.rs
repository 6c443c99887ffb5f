//! Represents the git concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.
//!
//! The serialized form of an object (the "envelope") is
//! `<type> <decimal length>\0<content>`. The object's ID is the SHA-1
//! hash of the entire envelope.

use std::str;

use sha1::{Digest, Sha1};

use crate::{Error, Result};

mod attribution;
pub use attribution::Attribution;

mod commit;
pub use commit::Commit;

mod id;
pub use id::{Id, ParseIdError};

mod kind;
pub use kind::Kind;

pub(crate) mod parse_utils;

pub mod tree;
pub use tree::TreeEntry;

/// Describes a single object stored (or about to be stored) in a repository.
///
/// The ID is computed when the object is constructed, so an `Object`
/// always knows the name it will be stored under.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Object {
    id: Id,
    kind: Kind,
    content: Vec<u8>,
}

impl Object {
    /// Create a new Object and compute its ID.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn new(kind: Kind, content: Vec<u8>) -> Object {
        let mut hasher = Sha1::new();
        hasher.update(header(kind, content.len()));
        hasher.update(&content);

        Object {
            id: id_from_digest(hasher.finalize().as_slice()),
            kind,
            content,
        }
    }

    /// Parse a serialized object envelope (after decompression).
    ///
    /// Fails with [`Error::MalformedObject`] if the header is missing or
    /// invalid, or if the declared size doesn't match the content length.
    ///
    /// [`Error::MalformedObject`]: ../enum.Error.html#variant.MalformedObject
    pub fn from_bytes(bytes: &[u8]) -> Result<Object> {
        let (kind, _size, content) = decode(bytes)?;
        Ok(Object::new(kind, content.to_vec()))
    }

    /// Return the ID of the object.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the size (in bytes) of the object's content.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the object's content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Return the object's content, without the header.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the object, returning its content.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Return the full envelope (header and content) that is hashed and stored.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = header(self.kind, self.content.len());
        bytes.extend_from_slice(&self.content);
        bytes
    }
}

/// Build the envelope for the given type and content and compute its ID.
pub fn encode(kind: Kind, content: &[u8]) -> (Id, Vec<u8>) {
    let mut bytes = header(kind, content.len());
    bytes.extend_from_slice(content);

    let id = id_from_digest(Sha1::digest(&bytes).as_slice());
    (id, bytes)
}

/// Split an envelope into its type, declared size, and content.
///
/// The declared size must match the number of bytes after the null terminator.
pub fn decode(bytes: &[u8]) -> Result<(Kind, usize, &[u8])> {
    let nul = match bytes.iter().position(|b| *b == 0) {
        Some(n) => n,
        None => {
            return Err(Error::MalformedObject(
                "header is not null-terminated".to_string(),
            ))
        }
    };

    let (header, content) = (&bytes[..nul], &bytes[nul + 1..]);

    if !header.contains(&b' ') {
        return Err(Error::MalformedObject(format!(
            "header {:?} has no size",
            String::from_utf8_lossy(header)
        )));
    }

    let (kind_name, size) = parse_utils::split_once(header, &b' ');

    let kind = Kind::from_name(kind_name).ok_or_else(|| {
        Error::MalformedObject(format!(
            "unknown object type {:?}",
            String::from_utf8_lossy(kind_name)
        ))
    })?;

    let size = parse_size(size).ok_or_else(|| {
        Error::MalformedObject(format!(
            "invalid object size {:?}",
            String::from_utf8_lossy(size)
        ))
    })?;

    if size != content.len() {
        return Err(Error::MalformedObject(format!(
            "header declares {} bytes but {} follow",
            size,
            content.len()
        )));
    }

    Ok((kind, size, content))
}

fn header(kind: Kind, len: usize) -> Vec<u8> {
    format!("{} {}\0", kind, len).into_bytes()
}

fn parse_size(size: &[u8]) -> Option<usize> {
    if size.is_empty() || !size.iter().all(u8::is_ascii_digit) {
        return None;
    }

    str::from_utf8(size).ok()?.parse().ok()
}

fn id_from_digest(digest: &[u8]) -> Id {
    let mut id = [0u8; 20];
    id.copy_from_slice(digest);
    Id::from_array(id)
}
