//! Turn file-system files and store references into [`MergeInput`]s.
//!
//! Every constructor takes the conflict-marker label up front; an unset label
//! falls back to the input's path once the path is known.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;
use trimerge_store::ContentStore;
use trimerge_types::{DiffFile, FileMode, IndexEntry, ObjectId};

use crate::error::MergeError;
use crate::input::{InputContent, MergeInput};

/// Read a file into an input with an owned copy of its bytes.
///
/// The mode is [`FileMode::BLOB_EXECUTABLE`] if the owner-executable bit is
/// set and [`FileMode::BLOB`] otherwise. The path must be valid UTF-8, since
/// it is compared against the other sides and may become a conflict label.
pub fn normalize_from_file(
    path: impl AsRef<Path>,
    label: Option<String>,
) -> Result<MergeInput, MergeError> {
    let path = path.as_ref();
    let io_err = |source| MergeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let utf8_path = path
        .to_str()
        .ok_or_else(|| io_err(io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8")))?
        .to_owned();

    let metadata = std::fs::metadata(path).map_err(io_err)?;
    let mut file = File::open(path).map_err(io_err)?;

    let mut data = Vec::new();
    let size = usize::try_from(metadata.len()).map_err(|_| {
        MergeError::Allocation(format!("{} bytes for '{}'", metadata.len(), path.display()))
    })?;
    data.try_reserve_exact(size)
        .map_err(|e| MergeError::Allocation(format!("{size} bytes for '{}': {e}", path.display())))?;
    file.read_to_end(&mut data).map_err(io_err)?;

    let mode = FileMode::from_metadata(&metadata);
    debug!(path = %path.display(), %mode, size = data.len(), "normalized input from file");

    Ok(MergeInput::present(
        utf8_path,
        mode,
        label,
        InputContent::Owned(data),
    ))
}

/// Look up stored content and borrow it into an input.
///
/// An absent `mode` is a successful no-op: the side does not have the file,
/// and the store is not consulted.
pub fn normalize_from_store(
    store: &dyn ContentStore,
    id: &ObjectId,
    path: &str,
    mode: FileMode,
    label: Option<String>,
) -> Result<MergeInput, MergeError> {
    if mode.is_absent() {
        debug!(path, "side absent; input left empty");
        return Ok(MergeInput::absent_with_label(label));
    }

    let record = store.read_required(id)?;
    debug!(
        path,
        %mode,
        id = %id.short_hex(),
        size = record.size(),
        "normalized input from store"
    );

    Ok(MergeInput::present(
        path.to_owned(),
        mode,
        label,
        InputContent::Borrowed(record),
    ))
}

/// [`normalize_from_store`] for an index entry.
pub fn normalize_from_index_entry(
    store: &dyn ContentStore,
    entry: &IndexEntry,
    label: Option<String>,
) -> Result<MergeInput, MergeError> {
    normalize_from_store(store, &entry.id, &entry.path, entry.mode, label)
}

/// [`normalize_from_store`] for one side of a diff delta.
pub fn normalize_from_diff_file(
    store: &dyn ContentStore,
    file: &DiffFile,
    label: Option<String>,
) -> Result<MergeInput, MergeError> {
    normalize_from_store(store, &file.id, &file.path, file.mode, label)
}
