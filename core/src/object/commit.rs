use std::str;

use super::{parse_utils, Attribution, Id};
use crate::{Error, Result};

/// The parsed content of a commit object.
///
/// A commit records a tree, at most one parent commit, the author and
/// committer, and a free-form message. Merge commits (more than one
/// parent) are not supported.
///
/// The serialized form is a series of newline-separated header lines,
/// a blank line, and then the message exactly as given:
///
/// ```text
/// tree <hex id>
/// parent <hex id>        (optional)
/// author <attribution>
/// committer <attribution>
///
/// <message>
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    tree: Id,
    parent: Option<Id>,
    author: Attribution,
    committer: Attribution,
    message: String,
}

impl Commit {
    pub fn new(
        tree: Id,
        parent: Option<Id>,
        author: Attribution,
        committer: Attribution,
        message: &str,
    ) -> Commit {
        Commit {
            tree,
            parent,
            author,
            committer,
            message: message.to_string(),
        }
    }

    pub fn tree(&self) -> &Id {
        &self.tree
    }

    pub fn parent(&self) -> Option<&Id> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Attribution {
        &self.author
    }

    pub fn committer(&self) -> &Attribution {
        &self.committer
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Serialize the commit into the content of a `commit` object.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut lines = vec![format!("tree {}", self.tree)];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }

        lines.push(format!("author {}", self.author));
        lines.push(format!("committer {}", self.committer));
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n").into_bytes()
    }

    /// Parse the content of a `commit` object.
    ///
    /// Header lines other than `tree`, `parent`, `author`, and `committer`
    /// that follow the committer line (as git writes for signed commits,
    /// for example) are ignored.
    pub fn parse(content: &[u8]) -> Result<Commit> {
        let (headers, message) = split_message(content);
        let mut lines = headers.split(|b| *b == b'\n');

        let tree = match lines.next().and_then(|l| parse_utils::header(l, b"tree")) {
            Some(id) => parse_id(id, "tree")?,
            None => return Err(malformed("first line must be `tree <id>`")),
        };

        let mut line = lines.next();

        let parent = match line.and_then(|l| parse_utils::header(l, b"parent")) {
            Some(id) => {
                line = lines.next();
                Some(parse_id(id, "parent")?)
            }
            None => None,
        };

        if line.and_then(|l| parse_utils::header(l, b"parent")).is_some() {
            return Err(malformed("commits with more than one parent are not supported"));
        }

        let author = parse_attribution(line, b"author")?;
        let committer = parse_attribution(lines.next(), b"committer")?;

        let message = str::from_utf8(message)
            .map_err(|_| malformed("message is not valid UTF-8"))?
            .to_string();

        Ok(Commit {
            tree,
            parent,
            author,
            committer,
            message,
        })
    }
}

fn split_message(content: &[u8]) -> (&[u8], &[u8]) {
    match content.windows(2).position(|w| w == b"\n\n") {
        Some(n) => (&content[..n], &content[n + 2..]),
        None => {
            let headers = content.strip_suffix(b"\n").unwrap_or(content);
            (headers, &[])
        }
    }
}

fn parse_id(hex: &[u8], header: &str) -> Result<Id> {
    Id::from_hex(hex)
        .map_err(|err| Error::MalformedCommit(format!("invalid {} ID: {}", header, err)))
}

fn parse_attribution(line: Option<&[u8]>, header: &[u8]) -> Result<Attribution> {
    let header_str = String::from_utf8_lossy(header);

    let value = line
        .and_then(|l| parse_utils::header(l, header))
        .ok_or_else(|| malformed(&format!("missing {} line", header_str)))?;

    Attribution::parse(value).ok_or_else(|| malformed(&format!("invalid {} line", header_str)))
}

fn malformed(reason: &str) -> Error {
    Error::MalformedCommit(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = "be9bfa841874ccc9f2ef7c48d0c76226f89b7189";
    const PARENT: &str = "d670460b4b4aece5915caf5c68d12f560a9fe3e4";

    fn thor() -> Attribution {
        Attribution::new("A. U. Thor", "author@localhost", 1, 0).unwrap()
    }

    fn assert_malformed(content: &str, expected: &str) {
        match Commit::parse(content.as_bytes()) {
            Err(Error::MalformedCommit(reason)) => assert!(
                reason.contains(expected),
                "expected {:?} in {:?}",
                expected,
                reason
            ),
            other => panic!("expected MalformedCommit, got {:?}", other),
        }
    }

    #[test]
    fn serialize_no_parent() {
        let c = Commit::new(TREE.parse().unwrap(), None, thor(), thor(), "first");

        assert_eq!(
            String::from_utf8(c.to_bytes()).unwrap(),
            "tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
             author A. U. Thor <author@localhost> 1 +0000\n\
             committer A. U. Thor <author@localhost> 1 +0000\n\
             \n\
             first"
        );
    }

    #[test]
    fn serialize_with_parent() {
        let c = Commit::new(
            TREE.parse().unwrap(),
            Some(PARENT.parse().unwrap()),
            thor(),
            thor(),
            "second\n",
        );

        assert_eq!(
            String::from_utf8(c.to_bytes()).unwrap(),
            "tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
             parent d670460b4b4aece5915caf5c68d12f560a9fe3e4\n\
             author A. U. Thor <author@localhost> 1 +0000\n\
             committer A. U. Thor <author@localhost> 1 +0000\n\
             \n\
             second\n"
        );
    }

    #[test]
    fn parse_what_we_write() {
        let c = Commit::new(
            TREE.parse().unwrap(),
            Some(PARENT.parse().unwrap()),
            thor(),
            Attribution::new("Committer", "c@localhost", 2, -60).unwrap(),
            "subject\n\nbody with\nseveral lines\n",
        );

        let parsed = Commit::parse(&c.to_bytes()).unwrap();
        assert_eq!(parsed, c);
        assert_eq!(parsed.parent().unwrap().to_string(), PARENT);
        assert_eq!(parsed.committer().tz_offset(), -60);
    }

    #[test]
    fn parse_git_style_commit() {
        let c = Commit::parse(
            b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
              author A. U. Thor <author@localhost> 1 +0000\n\
              committer A. U. Thor <author@localhost> 1 +0000\n\
              encoding ISO-8859-1\n\
              \n\
              message\n",
        )
        .unwrap();

        assert_eq!(c.tree().to_string(), TREE);
        assert_eq!(c.parent(), None);
        assert_eq!(c.author(), &thor());
        assert_eq!(c.message(), "message\n");
    }

    #[test]
    fn parse_without_message() {
        let c = Commit::parse(
            b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
              author <> 0 +0000\n\
              committer <> 0 +0000\n",
        )
        .unwrap();

        assert_eq!(c.message(), "");
        assert_eq!(c.author().name(), "");
    }

    #[test]
    fn invalid_tree() {
        assert_malformed("", "first line must be `tree <id>`");
        assert_malformed(
            "parent be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n",
            "first line must be `tree <id>`",
        );
        assert_malformed("tree be9bfa84\n", "invalid tree ID");
        assert_malformed(
            "tree be9bfa841874ccc9f2ef7c48d0c76226f89b718z\n",
            "invalid tree ID",
        );
    }

    #[test]
    fn invalid_parent() {
        assert_malformed(
            "tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
             parent zzz\n",
            "invalid parent ID",
        );
    }

    #[test]
    fn two_parents() {
        assert_malformed(
            "tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
             parent be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
             parent d670460b4b4aece5915caf5c68d12f560a9fe3e4\n\
             author <> 0 +0000\n\
             committer <> 0 +0000\n",
            "more than one parent",
        );
    }

    #[test]
    fn missing_author_or_committer() {
        assert_malformed(
            "tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n",
            "missing author line",
        );
        assert_malformed(
            "tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
             author <> 0 +0000\n",
            "missing committer line",
        );
    }

    #[test]
    fn corrupt_attribution() {
        assert_malformed(
            "tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
             author no email here\n\
             committer <> 0 +0000\n",
            "invalid author line",
        );
    }
}
