//! Rules for names that may appear in a tree entry.
//!
//! A tree entry name is a single path segment: it may not be empty,
//! contain a `/` or null byte, or be one of the names that would let a
//! checkout escape its target directory or overwrite repository metadata.

use crate::{Error, Result};

/// Returns `Ok(())` if `name` may be used as a tree entry name.
pub fn check(name: &str) -> Result<()> {
    if is_valid(name.as_bytes()) {
        Ok(())
    } else {
        Err(Error::InvalidPathName(name.to_string()))
    }
}

fn is_valid(segment: &[u8]) -> bool {
    !segment.is_empty()
        && !segment.contains(&0)
        && !segment.contains(&b'/')
        && segment != b"."
        && segment != b".."
        && !is_dot_git(segment)
}

fn is_dot_git(segment: &[u8]) -> bool {
    // `git~1` is the 8.3 short name Windows may assign to `.git`.
    segment.eq_ignore_ascii_case(b".git") || segment.eq_ignore_ascii_case(b"git~1")
}
