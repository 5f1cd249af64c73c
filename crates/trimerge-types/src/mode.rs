use std::fmt;
use std::fs::Metadata;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Mode of a tracked file on one side of a merge.
///
/// The raw value follows the conventional octal encoding of tracked-file
/// modes. Zero is reserved: [`FileMode::ABSENT`] means the side does not have
/// the file at all, and every other field of that side must be ignored.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMode(u32);

impl FileMode {
    /// The side does not track this file.
    pub const ABSENT: Self = Self(0);
    /// Subtree / directory (0o040000).
    pub const TREE: Self = Self(0o040000);
    /// Regular file (0o100644).
    pub const BLOB: Self = Self(0o100644);
    /// Executable file (0o100755).
    pub const BLOB_EXECUTABLE: Self = Self(0o100755);
    /// Symbolic link (0o120000).
    pub const LINK: Self = Self(0o120000);
    /// Submodule commit reference (0o160000).
    pub const COMMIT: Self = Self(0o160000);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` for the absent sentinel.
    pub const fn is_absent(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the side has the file.
    pub const fn exists(self) -> bool {
        self.0 != 0
    }

    pub const fn is_executable(self) -> bool {
        self.0 == Self::BLOB_EXECUTABLE.0
    }

    /// Derive a blob mode from file-system metadata.
    ///
    /// Only the owner-executable bit is consulted, so the result is always
    /// [`FileMode::BLOB`] or [`FileMode::BLOB_EXECUTABLE`].
    pub fn from_metadata(metadata: &Metadata) -> Self {
        if is_executable(metadata) {
            Self::BLOB_EXECUTABLE
        } else {
            Self::BLOB
        }
    }
}

#[cfg(unix)]
fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &Metadata) -> bool {
    false
}

impl fmt::Debug for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileMode({:06o})", self.0)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}

impl FromStr for FileMode {
    type Err = TypeError;

    /// Parse an octal mode such as `100644`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u32::from_str_radix(s, 8)
            .map(Self)
            .map_err(|e| TypeError::InvalidMode(format!("{s}: {e}")))
    }
}

impl From<u32> for FileMode {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}
