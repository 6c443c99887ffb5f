//! This crate provides a repository that stores content on the local file system.
//!
//! **IMPORTANT NOTE:** This is intended for single-process use. There is no
//! locking: two processes writing to the same repository may race on reference
//! updates (object writes are atomic renames, so those are safe).
//!
//! That said, it does intentionally use the same `.git` folder format as
//! command-line git so that results may be compared for similar operations.

mod on_disk_repo;
pub use on_disk_repo::{OnDiskRepo, DEFAULT_BRANCH, GIT_DIR_NAME};
