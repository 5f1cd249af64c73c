//! Foundation types for trimerge.
//!
//! Every other trimerge crate depends on `trimerge-types`. It carries only
//! plain data: identifiers, modes, and the descriptors callers use to name one
//! side of a three-way file merge.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- Content identifier (domain-separated BLAKE3 hash of a blob)
//! - [`FileMode`] -- Tracked-file mode, with [`FileMode::ABSENT`] meaning "not on this side"
//! - [`IndexEntry`] -- A path tracked in an index, referring to stored content
//! - [`DiffFile`] -- One side of a diff delta, referring to stored content

pub mod entry;
pub mod error;
pub mod mode;
pub mod object;

pub use entry::{DiffFile, IndexEntry};
pub use error::TypeError;
pub use mode::FileMode;
pub use object::ObjectId;
