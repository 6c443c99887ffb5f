use crate::{App, Result};

mod cat_file;
mod checkout;
mod commit;
mod commit_tree;
mod find_repo;
mod hash_object;
mod identity;
mod init;
mod rev_parse;
mod switch;
mod write_tree;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(cat_file::subcommand())
        .subcommand(checkout::subcommand())
        .subcommand(commit::subcommand())
        .subcommand(commit_tree::subcommand())
        .subcommand(hash_object::subcommand())
        .subcommand(init::subcommand())
        .subcommand(switch::subcommand())
        .subcommand(write_tree::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Ugh. Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("cat-file", Some(m)) => cat_file::run(app, &m),
        ("checkout", Some(m)) => checkout::run(app, &m),
        ("commit", Some(m)) => commit::run(app, &m),
        ("commit-tree", Some(m)) => commit_tree::run(app, &m),
        ("hash-object", Some(m)) => hash_object::run(app, &m),
        ("init", Some(m)) => init::run(app, &m),
        ("switch", Some(m)) => switch::run(app, &m),
        ("write-tree", Some(m)) => write_tree::run(app, &m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}
