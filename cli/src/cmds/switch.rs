use std::io::Write;

use super::{find_repo, rev_parse, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use minigit_core::refs;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("switch")
        .about("Point a branch at a commit, make it current, and check it out")
        .arg(
            Arg::with_name("branch")
                .required(true)
                .help("The branch to switch to"),
        )
        .arg(
            Arg::with_name("commit")
                .help("The commit the branch should point to (default: the branch's current commit)"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let mut repo = find_repo::from_app(app)?;
    let branch = matches.value_of("branch").unwrap_or_default();

    let commit = match matches.value_of("commit") {
        Some(name) => rev_parse::resolve(&repo, name)?,
        None => {
            let branch_ref = refs::branch_ref(branch)?;
            rev_parse::resolve(&repo, &branch_ref)
                .map_err(|_| format!("no such branch: {}", branch))?
        }
    };

    repo.switch_branch(branch, &commit)?;

    writeln!(app, "Switched to branch '{}'", branch)?;
    Ok(())
}
