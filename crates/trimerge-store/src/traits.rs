use std::sync::Arc;

use trimerge_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::record::ContentRecord;

/// Content-addressed blob store.
///
/// Implementations must satisfy these invariants:
/// - Records are immutable once written; the same data always produces the
///   same id.
/// - Concurrent reads are always safe.
/// - All I/O errors are propagated, never silently ignored.
pub trait ContentStore: Send + Sync {
    /// Read a record by id.
    ///
    /// Returns `Ok(None)` if the id is unknown.
    /// Returns `Err` on I/O failure or data corruption.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Arc<ContentRecord>>>;

    /// Write a record and return its id.
    ///
    /// Writing content that is already present is a no-op.
    fn write(&self, record: ContentRecord) -> StoreResult<ObjectId>;

    /// Check whether a record exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read a record that must exist, mapping a miss to [`StoreError::NotFound`].
    fn read_required(&self, id: &ObjectId) -> StoreResult<Arc<ContentRecord>> {
        self.read(id)?.ok_or(StoreError::NotFound(*id))
    }
}
