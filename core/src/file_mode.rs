use std::fmt::{self, Display, Formatter};

const TYPE_MASK: u32 = 0o170000;

/// Describes the file type as represented on disk.
///
/// Git uses a variation on the Unix file permissions flags to denote a file's
/// intended type on disk. The following values are recognized:
///
/// * `0o100644` - normal file
/// * `0o100755` - executable file
/// * `0o120000` - symbolic link
/// * `0o040000` - tree (subdirectory)
/// * `0o160000` - submodule (aka gitlink)
///
/// Trees written by older tools may carry other modes (`100664`, `100600`);
/// those are kept as-is in `Other` so that reading and rewriting such a tree
/// does not change its ID.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    SymbolicLink,
    Tree,
    Submodule,
    Other(u32),
}

impl FileMode {
    /// Convert from git file-mode integer to `FileMode` enum.
    ///
    /// The recognized constants map to their named variants; any other
    /// value is carried in `FileMode::Other`.
    pub fn from_value(value: u32) -> FileMode {
        match value {
            0o100644 => FileMode::Normal,
            0o100755 => FileMode::Executable,
            0o120000 => FileMode::SymbolicLink,
            0o040000 => FileMode::Tree,
            0o160000 => FileMode::Submodule,
            _ => FileMode::Other(value),
        }
    }

    /// Convert from the octal ASCII form found in tree entries (e.g. `100644`).
    ///
    /// Returns `None` unless `mode` is one to six octal digits. Leading zeros
    /// are rejected, matching git's own tree checks.
    pub fn from_octal_slice(mode: &[u8]) -> Option<FileMode> {
        if mode.is_empty() || mode.len() > 6 || mode[0] == b'0' {
            return None;
        }

        let mut value = 0u32;
        for digit in mode {
            match digit {
                b'0'..=b'7' => value = value * 8 + u32::from(digit - b'0'),
                _ => return None,
            }
        }

        Some(FileMode::from_value(value))
    }

    /// Convert from `FileMode` enum to git file-mode integer.
    pub fn to_value(self) -> u32 {
        match self {
            FileMode::Normal => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::SymbolicLink => 0o120000,
            FileMode::Tree => 0o040000,
            FileMode::Submodule => 0o160000,
            FileMode::Other(value) => value,
        }
    }

    /// Unix permission bits to apply when materializing this entry.
    pub fn permissions(self) -> u32 {
        self.to_value() & 0o777
    }

    pub fn is_tree(self) -> bool {
        self.to_value() & TYPE_MASK == 0o040000
    }

    pub fn is_symlink(self) -> bool {
        self.to_value() & TYPE_MASK == 0o120000
    }

    pub fn is_submodule(self) -> bool {
        self.to_value() & TYPE_MASK == 0o160000
    }
}

/// The octal ASCII form written into tree entries.
///
/// Note that git writes trees as `40000`, without a leading zero.
impl Display for FileMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:o}", self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value() {
        assert_eq!(FileMode::from_value(0o100644), FileMode::Normal);
        assert_eq!(FileMode::from_value(0o100755), FileMode::Executable);
        assert_eq!(FileMode::from_value(0o120000), FileMode::SymbolicLink);
        assert_eq!(FileMode::from_value(0o040000), FileMode::Tree);
        assert_eq!(FileMode::from_value(0o160000), FileMode::Submodule);
        assert_eq!(
            FileMode::from_value(0o100664),
            FileMode::Other(0o100664)
        );
        assert_eq!(FileMode::from_value(0), FileMode::Other(0));
    }

    #[test]
    fn from_octal_slice() {
        assert_eq!(FileMode::from_octal_slice(b"100644"), Some(FileMode::Normal));
        assert_eq!(
            FileMode::from_octal_slice(b"100755"),
            Some(FileMode::Executable)
        );
        assert_eq!(
            FileMode::from_octal_slice(b"120000"),
            Some(FileMode::SymbolicLink)
        );
        assert_eq!(FileMode::from_octal_slice(b"40000"), Some(FileMode::Tree));
        assert_eq!(
            FileMode::from_octal_slice(b"160000"),
            Some(FileMode::Submodule)
        );
        assert_eq!(
            FileMode::from_octal_slice(b"100664"),
            Some(FileMode::Other(0o100664))
        );
        assert_eq!(
            FileMode::from_octal_slice(b"100600"),
            Some(FileMode::Other(0o100600))
        );

        assert_eq!(FileMode::from_octal_slice(b"040000"), None);
        assert_eq!(FileMode::from_octal_slice(b"100648"), None);
        assert_eq!(FileMode::from_octal_slice(b"9100644"), None);
        assert_eq!(FileMode::from_octal_slice(b"1000000"), None);
        assert_eq!(FileMode::from_octal_slice(b""), None);
    }

    #[test]
    fn to_value() {
        assert_eq!(FileMode::to_value(FileMode::Normal), 0o100644);
        assert_eq!(FileMode::to_value(FileMode::Executable), 0o100755);
        assert_eq!(FileMode::to_value(FileMode::SymbolicLink), 0o120000);
        assert_eq!(FileMode::to_value(FileMode::Tree), 0o040000);
        assert_eq!(FileMode::to_value(FileMode::Submodule), 0o160000);
        assert_eq!(FileMode::to_value(FileMode::Other(0o100600)), 0o100600);
    }

    #[test]
    fn display_round_trips() {
        for mode in &[
            FileMode::Normal,
            FileMode::Executable,
            FileMode::SymbolicLink,
            FileMode::Tree,
            FileMode::Submodule,
            FileMode::Other(0o100664),
        ] {
            let text = mode.to_string();
            assert_eq!(FileMode::from_octal_slice(text.as_bytes()), Some(*mode));
        }

        assert_eq!(FileMode::Tree.to_string(), "40000");
        assert_eq!(FileMode::Other(0o100600).to_string(), "100600");
    }

    #[test]
    fn permissions() {
        assert_eq!(FileMode::Normal.permissions(), 0o644);
        assert_eq!(FileMode::Executable.permissions(), 0o755);
        assert_eq!(FileMode::Tree.permissions(), 0);
        assert_eq!(FileMode::Other(0o100664).permissions(), 0o664);
        assert_eq!(FileMode::Other(0o100600).permissions(), 0o600);
    }

    #[test]
    fn type_bits() {
        assert!(FileMode::Tree.is_tree());
        assert!(!FileMode::Normal.is_tree());
        assert!(FileMode::SymbolicLink.is_symlink());
        assert!(FileMode::Submodule.is_submodule());
        assert!(!FileMode::Other(0o100664).is_tree());
        assert!(!FileMode::Other(0o100664).is_symlink());
    }
}
