//! One side of a three-way file merge.

use std::sync::Arc;

use trimerge_store::ContentRecord;
use trimerge_types::FileMode;

/// The bytes of a merge input and who owns them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InputContent {
    /// No content: the side is absent or has been released.
    #[default]
    Empty,
    /// A private copy, read from the file system.
    Owned(Vec<u8>),
    /// A view into a store record; the `Arc` keeps the record alive.
    Borrowed(Arc<ContentRecord>),
}

impl InputContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Owned(data) => data,
            Self::Borrowed(record) => record.data(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    /// The record holding borrowed content alive, if any.
    pub fn owner(&self) -> Option<&Arc<ContentRecord>> {
        match self {
            Self::Borrowed(record) => Some(record),
            _ => None,
        }
    }
}

/// One side (ancestor, ours or theirs) of a merge, normalized.
///
/// Built by one of the `normalize_from_*` functions. When
/// [`mode`](MergeInput::mode) is [`FileMode::ABSENT`] the side does not have
/// the file and the path, label and content carry no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeInput {
    pub(crate) path: Option<String>,
    pub(crate) mode: FileMode,
    pub(crate) label: Option<String>,
    pub(crate) content: InputContent,
}

impl MergeInput {
    /// An input for a side that does not have the file.
    pub fn absent() -> Self {
        Self::default()
    }

    /// An input for a side that does not have the file, carrying a label so
    /// callers can still report which side it was.
    pub fn absent_with_label(label: Option<String>) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    pub(crate) fn present(
        path: String,
        mode: FileMode,
        label: Option<String>,
        content: InputContent,
    ) -> Self {
        // An unset label displays as the path.
        let label = label.or_else(|| Some(path.clone()));
        Self {
            path: Some(path),
            mode,
            label,
            content,
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Name used in conflict markers for this side.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Replace the conflict-marker label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn content(&self) -> &InputContent {
        &self.content
    }

    /// The content bytes (empty for an absent side).
    pub fn data(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Returns `true` if this side has the file.
    pub fn exists(&self) -> bool {
        self.mode.exists()
    }

    /// Free the path, label and content, leaving an absent input.
    ///
    /// Returns `true` if anything was held. Calling it again is a no-op that
    /// returns `false`; dropping the input has the same effect.
    pub fn release(&mut self) -> bool {
        let held = self.path.is_some()
            || self.label.is_some()
            || self.mode.exists()
            || !matches!(self.content, InputContent::Empty);
        *self = Self::default();
        held
    }
}
