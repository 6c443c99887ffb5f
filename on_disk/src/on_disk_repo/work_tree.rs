use std::{
    fs::{self, DirEntry, Metadata},
    io,
    path::Path,
};

use log::{debug, trace};

use minigit_core::{
    file_mode::FileMode,
    object::{tree, Id, Kind, TreeEntry},
    refs::{self, RefTarget},
    repo::Repo,
    Error, Result,
};

use super::{OnDiskRepo, GIT_DIR_NAME};

impl OnDiskRepo {
    /// Store the contents of `dir` as a tree (recursively) and return the tree's ID.
    ///
    /// Every file becomes a blob. Subdirectories become subtrees, except empty
    /// ones, which are left out. Symbolic links are stored as links, not followed.
    /// Any `.git` directory is ignored.
    ///
    /// Tree entry names are UTF-8: a file whose name is not valid UTF-8 fails
    /// the build with [`Error::InvalidPathName`].
    ///
    /// [`Error::InvalidPathName`]: ../minigit_core/enum.Error.html#variant.InvalidPathName
    pub fn build_tree<P: AsRef<Path>>(&mut self, dir: P) -> Result<Id> {
        let dir = dir.as_ref();
        let id = match self.build_subtree(dir)? {
            Some(id) => id,
            None => self.put(Kind::Tree, Vec::new())?,
        };

        debug!("built tree {} from {}", id, dir.display());
        Ok(id)
    }

    /// Store the repository's working directory as a tree.
    ///
    /// Analogous to [`git write-tree`](https://git-scm.com/docs/git-write-tree),
    /// except that there is no index: the tree reflects the files on disk.
    pub fn write_tree(&mut self) -> Result<Id> {
        let work_dir = self.work_dir.clone();
        self.build_tree(work_dir)
    }

    // Returns `None` for a directory with nothing worth storing.
    fn build_subtree(&mut self, dir: &Path) -> Result<Option<Id>> {
        let mut entries = Vec::new();

        for dir_entry in fs::read_dir(dir)? {
            let dir_entry = dir_entry?;
            let file_name = dir_entry.file_name();
            let name = file_name
                .to_str()
                .ok_or_else(|| Error::InvalidPathName(file_name.to_string_lossy().into_owned()))?;

            if name == GIT_DIR_NAME {
                continue;
            }

            let file_type = dir_entry.file_type()?;
            let (mode, id) = if file_type.is_dir() {
                match self.build_subtree(&dir_entry.path())? {
                    Some(id) => (FileMode::Tree, id),
                    None => {
                        trace!("skipping empty directory {}", dir_entry.path().display());
                        continue;
                    }
                }
            } else if file_type.is_symlink() {
                let target = link_target(&dir_entry)?;
                (FileMode::SymbolicLink, self.put(Kind::Blob, target)?)
            } else {
                let content = fs::read(dir_entry.path())?;
                (file_mode(&dir_entry.metadata()?), self.put(Kind::Blob, content)?)
            };

            trace!("{} {} {}", mode, id, name);
            entries.push(TreeEntry::new(mode, name, id)?);
        }

        if entries.is_empty() {
            return Ok(None);
        }

        tree::sort_entries(&mut entries);
        let content = tree::encode_entries(&entries)?;
        self.put(Kind::Tree, content).map(Some)
    }

    /// Recreate the files of a tree (or of a commit's tree) under `target`.
    ///
    /// Directories are created as needed. Whatever already sits at an entry's
    /// path is replaced: a file where the tree has a directory, a directory
    /// where it has a file, and symbolic links of any kind, which are never
    /// followed. Files that aren't part of the tree are left alone.
    pub fn checkout_tree<P: AsRef<Path>>(&self, id: &Id, target: P) -> Result<()> {
        let target = target.as_ref();
        let tree_id = self.resolve_tree(id)?;

        fs::create_dir_all(target)?;
        self.checkout_subtree(&tree_id, target)?;

        debug!("checked out {} into {}", tree_id, target.display());
        Ok(())
    }

    fn checkout_subtree(&self, tree_id: &Id, dir: &Path) -> Result<()> {
        for entry in self.read_tree(tree_id)? {
            let path = dir.join(entry.name());
            let mode = entry.mode();
            trace!("{} {} {}", mode, entry.id(), path.display());

            if mode.is_tree() {
                make_dir(&path)?;
                self.checkout_subtree(entry.id(), &path)?;
            } else if mode.is_submodule() {
                make_dir(&path)?;
            } else if mode.is_symlink() {
                let target = self.read_blob(entry.id())?;
                write_symlink(&target, &path)?;
            } else {
                let content = self.read_blob(entry.id())?;
                remove_existing(&path)?;
                fs::write(&path, content)?;
                set_permissions(&path, mode)?;
            }
        }

        Ok(())
    }

    fn read_blob(&self, id: &Id) -> Result<Vec<u8>> {
        match self.get(id)? {
            (Kind::Blob, content) => Ok(content),
            (kind, _) => Err(Error::MalformedTree(format!(
                "entry {} refers to a {}, not a blob",
                id, kind
            ))),
        }
    }

    /// Point `branch` at `commit`, make it the current branch, and check out
    /// its tree into the working directory.
    ///
    /// The reference updates happen first. If the checkout fails partway, the
    /// branch and `HEAD` stay updated and the working directory is left as is.
    pub fn switch_branch(&mut self, branch: &str, commit: &Id) -> Result<()> {
        let branch_ref = refs::branch_ref(branch)?;

        self.write_ref(&branch_ref, &RefTarget::Direct(*commit))?;
        self.write_ref(refs::HEAD, &RefTarget::Symbolic(branch_ref))?;

        let work_dir = self.work_dir.clone();
        self.checkout_tree(commit, work_dir)?;

        debug!("switched to branch {} at {}", branch, commit);
        Ok(())
    }
}

#[cfg(unix)]
fn file_mode(metadata: &Metadata) -> FileMode {
    use std::os::unix::fs::PermissionsExt;

    if metadata.permissions().mode() & 0o111 != 0 {
        FileMode::Executable
    } else {
        FileMode::Normal
    }
}

#[cfg(not(unix))]
fn file_mode(_metadata: &Metadata) -> FileMode {
    FileMode::Normal
}

#[cfg(unix)]
fn link_target(dir_entry: &DirEntry) -> Result<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;

    let target = fs::read_link(dir_entry.path())?;
    Ok(target.as_os_str().as_bytes().to_vec())
}

#[cfg(not(unix))]
fn link_target(dir_entry: &DirEntry) -> Result<Vec<u8>> {
    let target = fs::read_link(dir_entry.path())?;
    Ok(target.to_string_lossy().into_owned().into_bytes())
}

// Leaves a real directory in place; anything else at `path` is removed first.
fn make_dir(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => {
            fs::remove_file(path)?;
            fs::create_dir(path)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => fs::create_dir(path),
        Err(err) => Err(err),
    }
}

fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn write_symlink(target: &[u8], path: &Path) -> Result<()> {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt, os::unix::fs::symlink};

    remove_existing(path)?;
    symlink(OsStr::from_bytes(target), path)?;
    Ok(())
}

// Without symlink support, the link becomes a plain file holding its target, as git does.
#[cfg(not(unix))]
fn write_symlink(target: &[u8], path: &Path) -> Result<()> {
    remove_existing(path)?;
    fs::write(path, target)?;
    Ok(())
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: FileMode) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode.permissions()))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: FileMode) -> Result<()> {
    Ok(())
}
