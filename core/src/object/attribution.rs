use std::{
    fmt,
    str::{self, FromStr},
};

use super::parse_utils::split_once;

/// An `Attribution` combines a person's identity (name and e-mail address)
/// with the time of a particular action.
///
/// Attributions appear as the `author` and `committer` lines of a commit.
///
/// The `timestamp` value is in seconds relative to the Unix epoch. The
/// `tz_offset` is in minutes relative to GMT.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribution {
    name: String,
    email: String,
    timestamp: i64,
    tz_offset: i16,
}

impl Attribution {
    /// Creates a new attribution.
    ///
    /// Returns `None` if `tz_offset` is outside the range of real-world
    /// time zones (-12:00 to +14:00).
    pub fn new(name: &str, email: &str, timestamp: i64, tz_offset: i16) -> Option<Attribution> {
        if !tz_offset_is_valid(tz_offset) {
            return None;
        }

        Some(Attribution {
            name: name.to_string(),
            email: email.to_string(),
            timestamp,
            tz_offset,
        })
    }

    /// Parse a name line (e.g. author, committer) into an `Attribution` struct.
    /// Returns `None` if unable to parse the line properly.
    pub fn parse(line: &[u8]) -> Option<Attribution> {
        let line = drop_last_newline(line);

        if !line.contains(&b'<') {
            return None;
        }

        let (name, line) = split_once(line, &b'<');
        let name = str::from_utf8(drop_last_space(name)).ok()?.to_string();

        if !line.contains(&b'>') {
            return None;
        }

        let (email, line) = split_once(line, &b'>');
        let email = str::from_utf8(email).ok()?.to_string();

        let line = drop_last_space(line);
        let (tz_offset, line) = last_word(line);
        let tz_offset = Attribution::parse_tz(tz_offset.as_str()).unwrap_or(0);

        let (timestamp, _line) = last_word(line);
        let timestamp = i64::from_str(timestamp.as_str()).unwrap_or(0);

        Some(Attribution {
            name,
            email,
            timestamp,
            tz_offset,
        })
    }

    /// Parse a time zone offset of the form `+hhmm` or `-hhmm` into minutes.
    ///
    /// Returns `None` if the string is malformed or out of range.
    pub fn parse_tz(s: &str) -> Option<i16> {
        let s = s.as_bytes();

        if s.len() != 5 || !s[1..].iter().all(u8::is_ascii_digit) {
            return None;
        }

        let sign: i16 = match s[0] {
            b'+' => 1,
            b'-' => -1,
            _ => return None,
        };

        let hh = from_digit(s[1]) * 10 + from_digit(s[2]);
        let mm = from_digit(s[3]) * 10 + from_digit(s[4]);
        if mm >= 60 {
            return None;
        }

        let offset = sign * (hh * 60 + mm);
        if tz_offset_is_valid(offset) {
            Some(offset)
        } else {
            None
        }
    }

    /// Returns the person's human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the person's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the timestamp (seconds since the Unix epoch).
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the timezone offset (minutes relative to GMT).
    pub fn tz_offset(&self) -> i16 {
        self.tz_offset
    }

    /// Returns the timezone formatted in human readable offset from GMT.
    pub fn format_tz(&self) -> String {
        let sign = if self.tz_offset < 0 { "-" } else { "+" };

        let offset = self.tz_offset.abs();
        let hours = offset / 60;
        let min = offset % 60;

        format!("{}{:02}{:02}", sign, hours, min)
    }
}

fn tz_offset_is_valid(tz_offset: i16) -> bool {
    (-720..=840).contains(&tz_offset)
}

fn drop_last_newline(s: &[u8]) -> &[u8] {
    if s.last() == Some(&b'\n') {
        &s[0..s.len() - 1]
    } else {
        s
    }
}

fn drop_last_space(s: &[u8]) -> &[u8] {
    if s.last() == Some(&b' ') {
        &s[0..s.len() - 1]
    } else {
        s
    }
}

fn last_word(s: &[u8]) -> (String, &[u8]) {
    let s = match s.iter().position(|b| b != &b' ') {
        Some(n) => &s[n..],
        None => s,
    };

    let (word, line) = rsplit_once(s, &b' ');
    let word = str::from_utf8(word).unwrap_or("").to_string();

    (word, line)
}

fn rsplit_once<'a>(s: &'a [u8], c: &u8) -> (&'a [u8], &'a [u8]) {
    match s.iter().rev().position(|b| b == c) {
        Some(n) => (&s[s.len() - n..], &s[0..s.len() - n - 1]),
        None => (s, &[]),
    }
}

fn from_digit(digit: u8) -> i16 {
    (digit - b'0') as i16
}

fn sanitize(s: &str) -> String {
    // Remove control characters (except CR) and angle brackets,
    // any of which would make the line ambiguous to parse.
    s.trim()
        .chars()
        .filter(|c| !matches!(*c as u32, 0..=12 | 14..=31 | 60 | 62))
        .collect()
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            sanitize(&self.name),
            sanitize(&self.email),
            self.timestamp,
            self.format_tz()
        )
    }
}
