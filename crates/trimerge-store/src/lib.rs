//! Content store interface for trimerge.
//!
//! The merge core never touches an object database directly. It reads blob
//! content through the [`ContentStore`] trait, which hands out
//! reference-counted [`ContentRecord`]s. A record is the lifetime holder for
//! the bytes: a merge input borrows the record's data for as long as it keeps
//! the `Arc` alive.
//!
//! # Storage Backends
//!
//! - [`InMemoryContentStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Rules
//!
//! 1. Records are immutable once written (content-addressing guarantees this).
//! 2. Concurrent reads are always safe.
//! 3. The store never interprets content.

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryContentStore;
pub use record::ContentRecord;
pub use traits::ContentStore;
