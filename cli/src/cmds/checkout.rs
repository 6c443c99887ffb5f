use std::io::Write;

use super::{find_repo, rev_parse, App, Result};

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("checkout")
        .about("Write the files of a commit or tree into a directory")
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The commit or tree to check out"),
        )
        .arg(
            Arg::with_name("directory")
                .help("Where to write the files (default: the working directory)"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let repo = find_repo::from_app(app)?;
    let id = rev_parse::resolve(&repo, matches.value_of("object").unwrap_or_default())?;

    let target = match matches.value_of_os("directory") {
        Some(dir) => app.resolve_path(dir),
        None => repo.work_dir().to_path_buf(),
    };

    repo.checkout_tree(&id, &target)?;

    writeln!(app, "Checked out {} into {}", id, target.display())?;
    Ok(())
}
