use std::io::Write;

use super::{find_repo, identity, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use minigit_core::{
    refs::{self, HEAD},
    repo::Repo,
};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("commit")
        .about("Record the working directory as a new commit on the current branch")
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

    let tree = repo.write_tree()?;
    let parent = repo.resolve_ref(HEAD)?;
    let author = identity::author()?;
    let message = matches.value_of("m").unwrap_or_default();

    let id = repo.commit(&tree, parent.as_ref(), &author, message, None)?;

    let target = repo.head_target()?;
    let branch = refs::branch_name(&target).unwrap_or("detached HEAD");
    let root = if parent.is_none() { " (root-commit)" } else { "" };
    let summary = message.lines().next().unwrap_or_default();

    writeln!(
        app,
        "[{}{} {}] {}",
        branch,
        root,
        &id.to_string()[..7],
        summary
    )?;
    Ok(())
}
