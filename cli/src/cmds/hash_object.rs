use std::{
    fs,
    io::{Read, Write},
};

use super::{find_repo, App, Result};

use clap::{Arg, ArgGroup, ArgMatches, SubCommand};
use minigit_core::{
    object::{tree, Commit, Kind, Object},
    repo::Repo,
};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally create an object from a file")
        .arg(
            Arg::with_name("t")
                .short("t")
                .takes_value(true)
                .value_name("type")
                .possible_values(&["blob", "tree", "commit"])
                .default_value("blob")
                .help("Specify the type"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file").help("The file to hash"))
        .group(
            ArgGroup::with_name("source")
                .args(&["stdin", "file"])
                .required(true),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let kind = matches
        .value_of("t")
        .and_then(|t| Kind::from_name(t.as_bytes()))
        .unwrap_or(Kind::Blob);

    let content = if matches.is_present("stdin") {
        let mut content = Vec::new();
        app.stdin.read_to_end(&mut content)?;
        content
    } else {
        let file = matches.value_of_os("file").unwrap_or_default();
        fs::read(app.resolve_path(file))?
    };

    // Refuse to create trees and commits that couldn't be read back.
    match kind {
        Kind::Tree => {
            tree::decode_entries(&content)?;
        }
        Kind::Commit => {
            Commit::parse(&content)?;
        }
        Kind::Blob => (),
    }

    let object = Object::new(kind, content);

    if matches.is_present("w") {
        let mut repo = find_repo::from_app(app)?;
        repo.put_object(&object)?;
    }

    writeln!(app, "{}", object.id())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{
        cmds::test_support::{err_in, run_in, temp_repo},
        App,
    };

    const HELLO_SHA1: &str = "5e1c309dae7f45e0f39b1bf3ac3cd9db12e7d689";

    #[test]
    fn hash_stdin_without_writing() {
        let dir = temp_repo();
        let dir_str = dir.path().to_str().unwrap();

        let stdout = App::run_with_stdin_and_args(
            b"Hello World".to_vec(),
            vec!["-C", dir_str, "hash-object", "--stdin"],
        )
        .unwrap();

        assert_eq!(stdout, format!("{}\n", HELLO_SHA1).as_bytes());
        assert!(!dir.path().join(".git/objects/5e").exists());
    }

    #[test]
    fn hash_file_outside_repo() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("test.txt");
        fs::write(&file, "test content\n").unwrap();

        let stdout =
            App::run_with_args(vec!["hash-object", file.to_str().unwrap()]).unwrap();
        assert_eq!(stdout, b"d670460b4b4aece5915caf5c68d12f560a9fe3e4\n".to_vec());
    }

    #[test]
    fn write_file() {
        let dir = temp_repo();
        fs::write(dir.path().join("hello"), "Hello World").unwrap();

        let stdout = run_in(dir.path(), &["hash-object", "-w", "hello"]);
        assert_eq!(stdout, format!("{}\n", HELLO_SHA1));

        let object_path = dir
            .path()
            .join(".git/objects/5e/1c309dae7f45e0f39b1bf3ac3cd9db12e7d689");
        assert!(object_path.is_file());
    }

    #[test]
    fn empty_tree_type() {
        let dir = temp_repo();
        fs::write(dir.path().join("empty"), "").unwrap();

        let stdout = run_in(dir.path(), &["hash-object", "-t", "tree", "empty"]);
        assert_eq!(stdout, "4b825dc642cb6eb9a060e54bf8d69288fbee4904\n");
    }

    #[test]
    fn error_malformed_tree() {
        let dir = temp_repo();
        fs::write(dir.path().join("junk"), "not a tree").unwrap();

        let err = err_in(dir.path(), &["hash-object", "-t", "tree", "-w", "junk"]);
        assert!(err.contains("malformed tree"), "{}", err);
    }

    #[test]
    fn error_unknown_type() {
        let dir = temp_repo();
        let err = err_in(dir.path(), &["hash-object", "-t", "tag", "--stdin"]);
        assert!(err.contains("isn't a valid value"), "{}", err);
    }

    #[test]
    fn error_no_source() {
        let err = App::run_with_args(vec!["hash-object"]).unwrap_err();
        assert!(
            err.to_string()
                .contains("required arguments were not provided"),
            "{}",
            err
        );
    }

    #[test]
    fn error_stdin_and_file() {
        let err = App::run_with_args(vec!["hash-object", "--stdin", "file"]).unwrap_err();
        assert!(err.to_string().contains("cannot be used with"), "{}", err);
    }

    #[test]
    fn error_missing_file() {
        let dir = temp_repo();
        let err = err_in(dir.path(), &["hash-object", "no-such-file"]);
        assert!(!err.is_empty());
    }

    #[test]
    fn error_write_outside_repo() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("hello"), "Hello World").unwrap();

        let err = err_in(temp.path(), &["hash-object", "-w", "hello"]);
        assert!(err.contains(".git"), "{}", err);
    }
}
