use std::{fs, path::Path};

use log::debug;

use minigit_core::{
    refs::{self, RefTarget},
    Result,
};

use super::DEFAULT_BRANCH;

const DIRS: &[&str] = &[
    "hooks",
    "info",
    "objects/info",
    "objects/pack",
    "refs/heads",
    "refs/tags",
];

const CONFIG: &str = "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n\tlogallrefupdates = true\n";

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

const EXCLUDE: &str = "# git ls-files --others --exclude-from=.git/info/exclude\n# Lines that start with '#' are comments.\n";

/// Lays out an empty `.git` directory the way command-line git does,
/// minus the sample hooks.
pub(super) fn create_git_dir(git_dir: &Path) -> Result<()> {
    for dir in DIRS {
        fs::create_dir_all(git_dir.join(dir))?;
    }

    for (name, content) in &[
        ("config", CONFIG),
        ("description", DESCRIPTION),
        ("info/exclude", EXCLUDE),
    ] {
        fs::write(git_dir.join(name), content)?;
    }

    let head = RefTarget::Symbolic(refs::branch_ref(DEFAULT_BRANCH)?);
    fs::write(git_dir.join(refs::HEAD), head.to_file_content())?;

    debug!("initialized empty repository in {}", git_dir.display());
    Ok(())
}
