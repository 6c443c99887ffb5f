use std::io::Write;

use super::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use minigit_on_disk::OnDiskRepo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty repository")
        .arg(
            Arg::with_name("directory")
                .required(true)
                .help("The directory to create"),
        )
}

pub(crate) fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    let dir = init_matches.value_of_os("directory").unwrap_or_default();
    let path = app.resolve_path(dir);

    std::fs::create_dir_all(&path)?;
    let repo = OnDiskRepo::init(&path)?;

    writeln!(
        app,
        "Initialized empty repository in {}",
        repo.git_dir().display()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::App;

    #[test]
    fn creates_repo() {
        let temp = tempfile::tempdir().unwrap();
        let r_path = temp.path().join("new-repo");
        let r_pathstr = r_path.to_str().unwrap();

        let stdout = App::run_with_args(vec!["init", r_pathstr]).unwrap();

        let expected_std = format!(
            "Initialized empty repository in {}\n",
            r_path.join(".git").display()
        );
        assert_eq!(stdout, expected_std.as_bytes());
        assert!(r_path.join(".git/objects").is_dir());
        assert_eq!(
            std::fs::read_to_string(r_path.join(".git/HEAD")).unwrap(),
            "ref: refs/heads/main\n"
        );
    }

    #[test]
    fn relative_to_start_dir() {
        let temp = tempfile::tempdir().unwrap();
        let temp_str = temp.path().to_str().unwrap();

        App::run_with_args(vec!["-C", temp_str, "init", "sub"]).unwrap();
        assert!(temp.path().join("sub/.git").is_dir());
    }

    #[test]
    fn error_already_a_repo() {
        let temp = tempfile::tempdir().unwrap();
        let temp_str = temp.path().to_str().unwrap();

        App::run_with_args(vec!["init", temp_str]).unwrap();
        let err = App::run_with_args(vec!["init", temp_str]).unwrap_err();
        assert!(err.to_string().contains("already exists"), "{}", err);
    }

    #[test]
    fn error_no_dir() {
        let err = App::run_with_args(vec!["init"]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("required arguments were not provided"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }

    #[test]
    fn error_too_many_args() {
        let err = App::run_with_args(vec!["init", "here", "and there"]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("wasn't expected"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }
}
