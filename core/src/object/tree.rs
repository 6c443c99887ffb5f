//! Encoding and decoding of `tree` object content.
//!
//! A tree is a concatenation of entries, each serialized as
//! `<octal mode> <name>\0<20-byte binary object ID>`, with no separator
//! between entries.

use std::{cmp::Ordering, collections::HashSet, str};

use super::{parse_utils, Id};
use crate::{file_mode::FileMode, path_segment, Error, Result};

/// A single named entry in a tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    mode: FileMode,
    name: String,
    id: Id,
}

impl TreeEntry {
    /// Create a tree entry.
    ///
    /// Fails with [`Error::InvalidPathName`] if `name` is not a single,
    /// non-reserved path segment.
    ///
    /// [`Error::InvalidPathName`]: ../../enum.Error.html#variant.InvalidPathName
    pub fn new(mode: FileMode, name: &str, id: Id) -> Result<TreeEntry> {
        path_segment::check(name)?;

        Ok(TreeEntry {
            mode,
            name: name.to_string(),
            id,
        })
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Git orders tree entries as if subtree names ended with `/`.
    fn cmp_git_order(&self, other: &TreeEntry) -> Ordering {
        let suffix = |e: &TreeEntry| -> &'static [u8] {
            if e.mode.is_tree() {
                &b"/"[..]
            } else {
                &b""[..]
            }
        };

        let left = self.name.as_bytes().iter().chain(suffix(self));
        let right = other.name.as_bytes().iter().chain(suffix(other));
        left.cmp(right)
    }
}

/// Sort entries into the order command-line git uses, so that identical
/// directory contents always produce the same tree ID as git would.
pub fn sort_entries(entries: &mut [TreeEntry]) {
    entries.sort_by(TreeEntry::cmp_git_order);
}

/// Serialize entries, in the order given, into the content of a tree object.
///
/// Fails with [`Error::MalformedTree`] if two entries share a name.
///
/// [`Error::MalformedTree`]: ../../enum.Error.html#variant.MalformedTree
pub fn encode_entries(entries: &[TreeEntry]) -> Result<Vec<u8>> {
    check_unique_names(entries)?;

    let mut content = Vec::new();
    for entry in entries {
        content.extend_from_slice(entry.mode.to_string().as_bytes());
        content.push(b' ');
        content.extend_from_slice(entry.name.as_bytes());
        content.push(0);
        content.extend_from_slice(entry.id.as_bytes());
    }

    Ok(content)
}

/// Parse the content of a tree object into its entries, preserving order.
///
/// Any well-formed octal mode is accepted. Entry names must be valid UTF-8;
/// trees naming files with other byte sequences are reported as
/// [`Error::MalformedTree`].
///
/// [`Error::MalformedTree`]: ../../enum.Error.html#variant.MalformedTree
pub fn decode_entries(content: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        if !rest.contains(&b' ') {
            return Err(malformed("entry has no mode".to_string()));
        }

        let (mode, after_mode) = parse_utils::split_once(rest, &b' ');
        let mode = FileMode::from_octal_slice(mode).ok_or_else(|| {
            malformed(format!("invalid mode {:?}", String::from_utf8_lossy(mode)))
        })?;

        let nul = after_mode
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| malformed("entry name is not null-terminated".to_string()))?;

        let name = str::from_utf8(&after_mode[..nul])
            .map_err(|_| malformed("entry name is not valid UTF-8".to_string()))?;

        let id_bytes = &after_mode[nul + 1..];
        if id_bytes.len() < 20 {
            return Err(malformed(format!("entry {:?} has a truncated object ID", name)));
        }

        let id = Id::new(&id_bytes[..20])?;
        let entry = TreeEntry::new(mode, name, id).map_err(|err| malformed(err.to_string()))?;
        entries.push(entry);

        rest = &id_bytes[20..];
    }

    check_unique_names(&entries)?;
    Ok(entries)
}

fn check_unique_names(entries: &[TreeEntry]) -> Result<()> {
    let mut names = HashSet::new();

    for entry in entries {
        if !names.insert(entry.name.as_str()) {
            return Err(malformed(format!("duplicate entry name {:?}", entry.name)));
        }
    }

    Ok(())
}

fn malformed(reason: String) -> Error {
    Error::MalformedTree(reason)
}
