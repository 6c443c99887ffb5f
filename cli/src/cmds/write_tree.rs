use std::io::Write;

use super::{find_repo, App, Result};

use clap::{ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("write-tree")
        .about("Create a tree object from the files in the working directory")
}

pub(crate) fn run(app: &mut App, _matches: &ArgMatches) -> Result<()> {
    let mut repo = find_repo::from_app(app)?;
    let id = repo.write_tree()?;

    writeln!(app, "{}", id)?;
    Ok(())
}
