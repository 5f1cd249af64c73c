//! Path and mode resolution.
//!
//! Both rules are the usual "only one side changed" heuristic: if one side
//! still matches the ancestor, the other side's value wins. Neither function
//! inspects content.

use trimerge_types::FileMode;

use crate::input::MergeInput;

/// Pick the path of the merged file, or `None` if it cannot be decided.
///
/// - No ancestor: both sides must agree on the path.
/// - Ancestor present: the side that renamed wins; if both renamed (or the
///   paths disagree without either matching the ancestor) there is no answer.
pub fn best_path<'a>(
    ancestor: &'a MergeInput,
    ours: &'a MergeInput,
    theirs: &'a MergeInput,
) -> Option<&'a str> {
    if !ancestor.exists() {
        return if ours.path() == theirs.path() {
            ours.path()
        } else {
            None
        };
    }

    if ancestor.path() == ours.path() {
        theirs.path()
    } else if ancestor.path() == theirs.path() {
        ours.path()
    } else {
        None
    }
}

/// Pick the mode of the merged file; [`FileMode::ABSENT`] marks a conflict.
///
/// - No ancestor: executable if either side is, otherwise a plain blob.
/// - Ancestor present: the side that changed mode wins; if both changed it
///   differently the result is absent.
pub fn best_mode(ancestor: &MergeInput, ours: &MergeInput, theirs: &MergeInput) -> FileMode {
    if !ancestor.exists() {
        return if ours.mode().is_executable() || theirs.mode().is_executable() {
            FileMode::BLOB_EXECUTABLE
        } else {
            FileMode::BLOB
        };
    }

    if ancestor.mode() == ours.mode() {
        theirs.mode()
    } else if ancestor.mode() == theirs.mode() {
        ours.mode()
    } else {
        FileMode::ABSENT
    }
}
