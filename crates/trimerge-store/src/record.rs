use trimerge_types::ObjectId;

/// Blob content as held by a store.
///
/// Stores hand records out behind an `Arc`; whoever holds the `Arc` keeps the
/// bytes alive, so a borrowed view into [`ContentRecord::data`] stays valid for
/// exactly as long as the holder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRecord {
    data: Vec<u8>,
}

impl ContentRecord {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// The raw content.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Compute the content-addressed id of this record.
    pub fn compute_id(&self) -> ObjectId {
        ObjectId::for_blob(&self.data)
    }
}

impl From<Vec<u8>> for ContentRecord {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for ContentRecord {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_matches_data() {
        let record = ContentRecord::from(&b"12345"[..]);
        assert_eq!(record.size(), 5);
        assert_eq!(record.data(), b"12345");
    }

    #[test]
    fn id_is_blob_id_of_content() {
        let record = ContentRecord::new(b"hello\n".to_vec());
        assert_eq!(record.compute_id(), ObjectId::for_blob(b"hello\n"));
    }
}
