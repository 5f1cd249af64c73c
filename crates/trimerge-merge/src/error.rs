//! Error types for the merge crate.

use std::path::PathBuf;

use trimerge_types::ObjectId;

/// Errors that abort a merge.
///
/// Textual conflicts are not errors; see
/// [`MergeResult::automergeable`](crate::MergeResult::automergeable).
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A file could not be stat'ed or read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content referenced by id does not exist in the store.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// A buffer for input content could not be allocated.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// The text-merge engine failed outright.
    #[error("failed to merge files: {0}")]
    Engine(#[from] trimerge_xdiff::EngineError),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(trimerge_store::StoreError),
}

impl From<trimerge_store::StoreError> for MergeError {
    fn from(err: trimerge_store::StoreError) -> Self {
        match err {
            trimerge_store::StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}
