use std::{io, path::PathBuf};

use thiserror::Error;

use crate::object::{Id, ParseIdError};

/// Describes the potential error conditions that might arise from minigit operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("object {0} not found")]
    ObjectNotFound(Id),

    #[error("malformed object: {0}")]
    MalformedObject(String),

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("malformed commit: {0}")]
    MalformedCommit(String),

    /// The stored bytes for this object could not be decompressed.
    #[error("object {id} is corrupt")]
    CorruptObject {
        id: Id,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    InvalidObjectId(#[from] ParseIdError),

    #[error("`{0}` is not a valid reference name")]
    InvalidRefName(String),

    #[error("reference {name} contains unrecognized content {content:?}")]
    MalformedRef { name: String, content: String },

    #[error("too many levels of symbolic references while resolving {0}")]
    RefLoop(String),

    #[error("`{0}` can not be used as a tree entry name")]
    InvalidPathName(String),

    #[error("work dir {} doesn't exist", .0.display())]
    WorkDirDoesntExist(PathBuf),

    #[error("git dir {} doesn't exist", .0.display())]
    GitDirDoesntExist(PathBuf),

    #[error("git dir {} already exists", .0.display())]
    GitDirShouldntExist(PathBuf),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// A specialized `Result` type for minigit operations.
pub type Result<T> = std::result::Result<T, Error>;
