use std::io::Write;

use super::{find_repo, rev_parse, App, Result};

use clap::{Arg, ArgGroup, ArgMatches, SubCommand};
use minigit_core::{
    object::{tree, Kind},
    repo::Repo,
};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content, type, or size information for an object")
        .arg(
            Arg::with_name("t")
                .short("t")
                .help("Show the object type"),
        )
        .arg(
            Arg::with_name("s")
                .short("s")
                .help("Show the object size"),
        )
        .arg(
            Arg::with_name("p")
                .short("p")
                .help("Pretty-print the object's content"),
        )
        .group(ArgGroup::with_name("mode").args(&["t", "s", "p"]).required(true))
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The object to show"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let repo = find_repo::from_app(app)?;
    let id = rev_parse::resolve(&repo, matches.value_of("object").unwrap_or_default())?;
    let (kind, content) = repo.get(&id)?;

    if matches.is_present("t") {
        writeln!(app, "{}", kind)?;
    } else if matches.is_present("s") {
        writeln!(app, "{}", content.len())?;
    } else if kind == Kind::Tree {
        for entry in tree::decode_entries(&content)? {
            let mode = entry.mode();
            let entry_kind = if mode.is_tree() {
                Kind::Tree
            } else if mode.is_submodule() {
                Kind::Commit
            } else {
                Kind::Blob
            };
            writeln!(
                app,
                "{:06o} {} {}\t{}",
                mode.to_value(),
                entry_kind,
                entry.id(),
                entry.name()
            )?;
        }
    } else {
        app.write_all(&content)?;
    }

    Ok(())
}
