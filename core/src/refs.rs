//! References: named pointers to commits, or to other references.
//!
//! A reference file contains either 40 hex digits (a direct reference)
//! or `ref: <name>` (a symbolic reference). `HEAD` is normally symbolic
//! and points at the current branch under `refs/heads/`.

use std::{fmt, str};

use crate::{object::Id, Error, Result};

/// The name of the reference that tracks the current branch.
pub const HEAD: &str = "HEAD";

/// Namespace for branch references.
pub const BRANCH_PREFIX: &str = "refs/heads/";

/// What a reference points at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefTarget {
    Direct(Id),
    Symbolic(String),
}

impl RefTarget {
    /// Parse the content of the reference file for `name`.
    pub fn parse(name: &str, content: &[u8]) -> Result<RefTarget> {
        let malformed = || Error::MalformedRef {
            name: name.to_string(),
            content: String::from_utf8_lossy(content).into_owned(),
        };

        let text = str::from_utf8(content).map_err(|_| malformed())?.trim_end();

        if let Some(target) = text.strip_prefix("ref:") {
            let target = target.trim_start();
            check_name(target).map_err(|_| malformed())?;
            Ok(RefTarget::Symbolic(target.to_string()))
        } else {
            Id::from_hex(text)
                .map(RefTarget::Direct)
                .map_err(|_| malformed())
        }
    }

    /// The text written to a reference file for this target.
    pub fn to_file_content(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefTarget::Direct(id) => write!(f, "{}", id),
            RefTarget::Symbolic(name) => write!(f, "ref: {}", name),
        }
    }
}

/// Returns the full reference name for a branch (e.g. `main` becomes `refs/heads/main`).
pub fn branch_ref(branch: &str) -> Result<String> {
    let name = format!("{}{}", BRANCH_PREFIX, branch);
    check_name(&name)?;
    Ok(name)
}

/// Returns the branch name if `name` is a branch reference.
pub fn branch_name(name: &str) -> Option<&str> {
    name.strip_prefix(BRANCH_PREFIX)
}

/// Verifies that `name` is `HEAD` or a well-formed name under `refs/`.
///
/// This is a subset of the rules enforced by `git check-ref-format`.
pub fn check_name(name: &str) -> Result<()> {
    if name == HEAD || (name.starts_with("refs/") && name.split('/').all(segment_is_valid)) {
        Ok(())
    } else {
        Err(Error::InvalidRefName(name.to_string()))
    }
}

fn segment_is_valid(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('.')
        && !segment.ends_with(".lock")
        && !segment.contains("..")
        && !segment.contains("@{")
        && !segment
            .chars()
            .any(|c| c.is_control() || " ~^:?*[\\".contains(c))
}
