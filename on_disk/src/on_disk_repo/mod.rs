//! A repository that stores content on the local file system.

use std::path::{Path, PathBuf};

use minigit_core::{
    object::{Id, Object},
    refs::RefTarget,
    repo::Repo,
    Error, Result,
};

mod init;
mod loose_object;
mod ref_files;
mod work_tree;

/// Name of the metadata directory inside the working directory.
pub const GIT_DIR_NAME: &str = ".git";

/// Branch that `HEAD` points at in a freshly initialized repository.
pub const DEFAULT_BRANCH: &str = "main";

/// Implementation of `minigit_core::repo::Repo` that stores content on the
/// local file system.
///
/// The repository root (the working directory) is explicit: every operation
/// works relative to the paths held here, never the process's current directory.
#[derive(Debug)]
pub struct OnDiskRepo {
    work_dir: PathBuf,
    git_dir: PathBuf,
}

impl OnDiskRepo {
    /// Open an existing on-disk repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.git` directory should
    /// exist at this path. Use `init` function to create an empty on-disk repository if
    /// necessary.
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let git_dir = work_dir.join(GIT_DIR_NAME);
        if !git_dir.exists() {
            return Err(Error::GitDirDoesntExist(git_dir));
        }

        Ok(OnDiskRepo { work_dir, git_dir })
    }

    /// Creates a new, empty repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();
        let git_dir = work_dir.join(GIT_DIR_NAME);
        if git_dir.exists() {
            return Err(Error::GitDirShouldntExist(git_dir));
        }

        init::create_git_dir(&git_dir)?;

        Ok(OnDiskRepo { work_dir, git_dir })
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }
}

impl Repo for OnDiskRepo {
    fn put_object(&mut self, object: &Object) -> Result<()> {
        self.put_loose_object(object)
    }

    fn get_object(&self, id: &Id) -> Result<Object> {
        self.get_loose_object(id)
    }

    fn exists(&self, id: &Id) -> Result<bool> {
        Ok(self.loose_object_path(id).is_file())
    }

    fn read_ref(&self, name: &str) -> Result<Option<RefTarget>> {
        self.read_ref_file(name)
    }

    fn write_ref(&mut self, name: &str, target: &RefTarget) -> Result<()> {
        self.write_ref_file(name, target)
    }
}

#[cfg(test)]
mod tests;
