use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;
use trimerge_types::ObjectId;

use crate::error::StoreResult;
use crate::record::ContentRecord;
use crate::traits::ContentStore;

/// In-memory, HashMap-based content store.
///
/// Intended for tests and embedding. Records are held as `Arc`s behind a
/// `RwLock`; a read hands out a new reference to the same record rather than
/// copying its bytes.
pub struct InMemoryContentStore {
    records: RwLock<HashMap<ObjectId, Arc<ContentRecord>>>,
}

impl InMemoryContentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Store raw bytes as a blob and return its id.
    pub fn insert_blob(&self, data: impl Into<Vec<u8>>) -> ObjectId {
        self.insert(ContentRecord::new(data.into()))
    }

    fn insert(&self, record: ContentRecord) -> ObjectId {
        let id = record.compute_id();
        let mut map = self.records.write().expect("lock poisoned");
        // Idempotent: the same id always maps to the same content.
        map.entry(id).or_insert_with(|| Arc::new(record));
        id
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for InMemoryContentStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Arc<ContentRecord>>> {
        let map = self.records.read().expect("lock poisoned");
        let found = map.get(id).cloned();
        debug!(id = %id.short_hex(), found = found.is_some(), "content read");
        Ok(found)
    }

    fn write(&self, record: ContentRecord) -> StoreResult<ObjectId> {
        Ok(self.insert(record))
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.records.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("record_count", &self.len())
            .finish()
    }
}
