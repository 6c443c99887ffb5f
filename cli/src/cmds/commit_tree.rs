use std::io::Write;

use super::{find_repo, identity, rev_parse, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use minigit_core::{
    object::{Commit, Kind},
    repo::Repo,
};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("commit-tree")
        .about("Create a new commit object without moving any reference")
        .arg(
            Arg::with_name("tree")
                .required(true)
                .help("An existing tree object"),
        )
        .arg(
            Arg::with_name("p")
                .short("p")
                .takes_value(true)
                .value_name("parent")
                .help("The parent commit"),
        )
        .arg(
            Arg::with_name("m")
                .short("m")
                .takes_value(true)
                .value_name("message")
                .required(true)
                .help("The commit message"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let mut repo = find_repo::from_app(app)?;

    let tree = rev_parse::resolve(&repo, matches.value_of("tree").unwrap_or_default())?;
    repo.read_tree(&tree)?;

    let parent = match matches.value_of("p") {
        Some(name) => {
            let parent = rev_parse::resolve(&repo, name)?;
            repo.read_commit(&parent)?;
            Some(parent)
        }
        None => None,
    };

    let author = identity::author()?;
    let message = matches.value_of("m").unwrap_or_default();
    let commit = Commit::new(tree, parent, author.clone(), author, message);

    let id = repo.put(Kind::Commit, commit.to_bytes())?;

    writeln!(app, "{}", id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use minigit_core::repo::Repo;
    use minigit_on_disk::OnDiskRepo;

    use crate::{
        cmds::test_support::{err_in, run_in, temp_repo},
        App,
    };

    const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

    #[test]
    fn chain_without_moving_refs() {
        let dir = temp_repo();
        run_in(dir.path(), &["write-tree"]);

        let c1 = run_in(dir.path(), &["commit-tree", EMPTY_TREE, "-m", "first"]);
        let c1 = c1.trim_end();
        let c2 = run_in(
            dir.path(),
            &["commit-tree", EMPTY_TREE, "-p", c1, "-m", "second"],
        );

        let text = run_in(dir.path(), &["cat-file", "-p", c2.trim_end()]);
        assert!(text.contains(&format!("\nparent {}\n", c1)), "{}", text);

        let repo = OnDiskRepo::new(dir.path()).unwrap();
        assert_eq!(repo.resolve_ref("HEAD").unwrap(), None);
    }

    #[test]
    fn error_tree_is_a_blob() {
        let dir = temp_repo();
        let blob = App::run_with_stdin_and_args(
            b"hello".to_vec(),
            vec!["-C", dir.path().to_str().unwrap(), "hash-object", "-w", "--stdin"],
        )
        .unwrap();
        let blob = String::from_utf8(blob).unwrap();

        let err = err_in(dir.path(), &["commit-tree", blob.trim_end(), "-m", "x"]);
        assert!(err.contains("is a blob, not a tree"), "{}", err);
    }

    #[test]
    fn error_missing_parent() {
        let dir = temp_repo();
        run_in(dir.path(), &["write-tree"]);

        let err = err_in(
            dir.path(),
            &[
                "commit-tree",
                EMPTY_TREE,
                "-p",
                "1111111111111111111111111111111111111111",
                "-m",
                "x",
            ],
        );
        assert_eq!(
            err,
            "object 1111111111111111111111111111111111111111 not found"
        );
    }

    #[test]
    fn error_no_message() {
        let dir = temp_repo();
        let err = err_in(dir.path(), &["commit-tree", EMPTY_TREE]);
        assert!(err.contains("required arguments were not provided"), "{}", err);
    }
}
