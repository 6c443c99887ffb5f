use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

// A `minigit` command with a fixed identity, so commit IDs are reproducible.
pub fn minigit(repo: &Path) -> Command {
    let mut cmd = Command::cargo_bin("minigit").unwrap();
    cmd.current_dir(repo)
        .env("GIT_AUTHOR_NAME", "A U Thor")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_AUTHOR_DATE", "1112911993 -0700");
    cmd
}

// Create an empty repository in a new temporary directory.
pub fn init_empty_repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    minigit(dir.path())
        .args(&["init", "."])
        .assert()
        .success();
    dir
}

// Run a command that should succeed and return its trimmed stdout.
#[allow(dead_code)] // not every test file uses this
pub fn stdout_of(repo: &Path, args: &[&str]) -> String {
    let output = minigit(repo).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "minigit {:?} failed:\n{}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim_end().to_string()
}
