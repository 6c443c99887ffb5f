use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use minigit_core::object::Attribution;

use super::Result;

const DEFAULT_NAME: &str = "minigit";
const DEFAULT_EMAIL: &str = "minigit@localhost";

// Build the author for a new commit from `GIT_AUTHOR_NAME`,
// `GIT_AUTHOR_EMAIL`, and `GIT_AUTHOR_DATE`.
pub(crate) fn author() -> Result<Attribution> {
    author_from(|key| env::var(key).ok(), now())
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn author_from<F>(var: F, now: i64) -> Result<Attribution>
where
    F: Fn(&str) -> Option<String>,
{
    let name = var("GIT_AUTHOR_NAME").unwrap_or_else(|| DEFAULT_NAME.to_string());
    let email = var("GIT_AUTHOR_EMAIL").unwrap_or_else(|| DEFAULT_EMAIL.to_string());

    let (timestamp, tz_offset) = match var("GIT_AUTHOR_DATE") {
        Some(date) => parse_date(&date)?,
        None => (now, 0),
    };

    let author = Attribution::new(&name, &email, timestamp, tz_offset)
        .ok_or_else(|| format!("invalid time zone offset: {}", tz_offset))?;
    Ok(author)
}

// `<seconds since epoch> [+-hhmm]`, the internal format git accepts.
fn parse_date(date: &str) -> Result<(i64, i16)> {
    let invalid = || format!("invalid GIT_AUTHOR_DATE: {:?}", date);

    let mut parts = date.split_whitespace();

    let timestamp = parts
        .next()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(invalid)?;

    let tz_offset = match parts.next() {
        Some(tz) => Attribution::parse_tz(tz).ok_or_else(invalid)?,
        None => 0,
    };

    if parts.next().is_some() {
        return Err(invalid().into());
    }

    Ok((timestamp, tz_offset))
}
