use minigit_core::{
    object::Id,
    refs::{self, HEAD},
    repo::Repo,
};

use super::Result;

// Turn an object name from the command line into an ID.
//
// Accepts a full 40-digit hex ID, `HEAD`, a full reference name
// (`refs/heads/main`), or a branch name (`main`). Abbreviated
// IDs are not supported.
pub(crate) fn resolve(repo: &dyn Repo, name: &str) -> Result<Id> {
    if let Ok(id) = Id::from_hex(name) {
        return Ok(id);
    }

    let candidates = vec![
        name.to_string(),
        format!("refs/{}", name),
        format!("{}{}", refs::BRANCH_PREFIX, name),
    ];

    for candidate in candidates {
        if refs::check_name(&candidate).is_err() {
            continue;
        }
        if let Some(id) = repo.resolve_ref(&candidate)? {
            return Ok(id);
        }
    }

    if name == HEAD {
        Err("HEAD does not point to a commit yet".into())
    } else {
        Err(format!("not a valid object name: {}", name).into())
    }
}
