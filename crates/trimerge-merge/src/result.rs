use trimerge_types::FileMode;
use trimerge_xdiff::MergedBuffer;

/// Outcome of a three-way file merge.
///
/// The merged bytes are held in the engine's [`MergedBuffer`] and are
/// independent of the inputs: releasing the result never touches them, and
/// releasing the inputs never touches the result.
#[derive(Debug, Default)]
pub struct MergeResult {
    /// Resolved path; `None` when it could not be decided and the caller must
    /// supply one.
    pub path: Option<String>,
    /// Resolved mode; [`FileMode::ABSENT`] when both sides changed it.
    pub mode: FileMode,
    /// `true` iff the engine left no conflicts.
    pub automergeable: bool,
    /// Number of conflict regions left in the merged content.
    pub conflicts: usize,
    pub(crate) data: Option<MergedBuffer>,
}

impl MergeResult {
    /// The merged content, or `None` if no merge ran or the result was
    /// released.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_ref().map(MergedBuffer::as_bytes)
    }

    /// Length of the merged content (zero when there is none).
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, MergedBuffer::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the engine ran.
    ///
    /// `false` for the empty result returned when ours or theirs does not have
    /// the file. Such a result has no path, an absent mode and no data; the
    /// caller must apply its own delete/modify policy.
    pub fn is_merged(&self) -> bool {
        self.data.is_some()
    }

    /// Take the merged buffer out of the result.
    pub fn take_data(&mut self) -> Option<MergedBuffer> {
        self.data.take()
    }

    /// Free the merged buffer.
    ///
    /// Returns `true` if a buffer was freed; releasing a result without data
    /// is a no-op.
    pub fn release(&mut self) -> bool {
        match self.data.take() {
            Some(buffer) => {
                buffer.release();
                true
            }
            None => false,
        }
    }
}
