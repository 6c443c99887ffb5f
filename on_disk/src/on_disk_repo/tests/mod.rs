use std::path::Path;

use tempfile::TempDir;

use super::OnDiskRepo;


// Creates an empty repository in a fresh temporary directory.
// The directory is deleted when the returned `TempDir` is dropped.
fn temp_repo() -> (TempDir, OnDiskRepo) {
    let dir = tempfile::tempdir().unwrap();
    let repo = OnDiskRepo::init(dir.path()).unwrap();
    (dir, repo)
}

fn write_file<P: AsRef<Path>>(path: P, content: &str) {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

#[cfg(unix)]
fn mode_of<P: AsRef<Path>>(path: P) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

#[cfg(unix)]
fn set_mode<P: AsRef<Path>>(path: P, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}
