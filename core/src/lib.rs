//! This crate implements the core data model for a minimal, git-compatible
//! object store: content-addressed objects, the tree and commit formats,
//! and references.
//!
//! Nothing in this crate touches the file system. Storage mechanisms implement
//! the [`Repo`] trait (see `minigit_on_disk` for the local-disk version).
//!
//! [`Repo`]: repo/trait.Repo.html

mod error;
pub use error::{Error, Result};

pub mod file_mode;
pub mod object;
pub mod path_segment;
pub mod refs;
pub mod repo;
