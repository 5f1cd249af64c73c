//! Merged output owned by the engine that produced it.

use std::fmt;

/// Bytes produced by a [`TextMerger`](crate::TextMerger).
///
/// Any engine wraps its output bytes with [`MergedBuffer::new`]. The bytes are
/// freed when the buffer is dropped or [`released`](MergedBuffer::release).
/// Callers that need a plain vector take it out with
/// [`MergedBuffer::into_vec`].
#[derive(Clone, PartialEq, Eq, Default)]
pub struct MergedBuffer {
    data: Vec<u8>,
}

impl MergedBuffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Take ownership of the bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Free the bytes.
    pub fn release(self) {
        drop(self);
    }
}

impl From<Vec<u8>> for MergedBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl AsRef<[u8]> for MergedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for MergedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedBuffer")
            .field("len", &self.data.len())
            .finish()
    }
}
