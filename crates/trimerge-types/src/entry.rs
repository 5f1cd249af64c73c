//! Descriptors naming one side of a merge by reference to stored content.

use serde::{Deserialize, Serialize};

use crate::mode::FileMode;
use crate::object::ObjectId;

/// A path tracked in an index, pointing at stored blob content.
///
/// A mode of [`FileMode::ABSENT`] marks an index stage that has no entry for
/// the path (for example the ancestor stage of an add/add conflict).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Id of the blob holding the file content.
    pub id: ObjectId,
    pub mode: FileMode,
    /// Size of the blob in bytes, as recorded by the index.
    pub size: u64,
}

impl IndexEntry {
    pub fn new(path: impl Into<String>, id: ObjectId, mode: FileMode, size: u64) -> Self {
        Self {
            path: path.into(),
            id,
            mode,
            size,
        }
    }

    /// An entry standing for a stage that does not have the file.
    pub fn absent(path: impl Into<String>) -> Self {
        Self::new(path, ObjectId::null(), FileMode::ABSENT, 0)
    }
}

/// One side of a diff delta, pointing at stored blob content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFile {
    pub path: String,
    pub id: ObjectId,
    pub mode: FileMode,
    pub size: u64,
}

impl DiffFile {
    pub fn new(path: impl Into<String>, id: ObjectId, mode: FileMode, size: u64) -> Self {
        Self {
            path: path.into(),
            id,
            mode,
            size,
        }
    }

    /// The side of a delta that does not exist (the old file of an addition,
    /// the new file of a deletion).
    pub fn absent(path: impl Into<String>) -> Self {
        Self::new(path, ObjectId::null(), FileMode::ABSENT, 0)
    }
}

impl From<IndexEntry> for DiffFile {
    fn from(entry: IndexEntry) -> Self {
        Self::new(entry.path, entry.id, entry.mode, entry.size)
    }
}
