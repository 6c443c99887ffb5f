use std::{env, path::Path};

use minigit_core::Result;
use minigit_on_disk::OnDiskRepo;

use crate::App;

// Discover the repo a command should operate on: the `-C` directory
// if one was given, otherwise the current working directory.
//
// This handles only the simplest case, where there is a `.git`
// directory directly within that path. Parent directories are
// not searched.
pub(crate) fn from_app(app: &App) -> Result<OnDiskRepo> {
    match app.start_dir() {
        Some(dir) => from_path(dir),
        None => from_current_dir(),
    }
}

pub(crate) fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDiskRepo> {
    OnDiskRepo::new(path)
}

fn from_current_dir() -> Result<OnDiskRepo> {
    // Tests never change the process's working directory; they pass `-C`.
    let path = env::current_dir()?;
    from_path(path)
}
