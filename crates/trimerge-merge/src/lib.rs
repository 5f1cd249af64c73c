//! Three-way file merge for trimerge.
//!
//! Merges one logical file from up to three sides (ancestor, ours, theirs),
//! each of which may be absent, renamed, or mode-changed. Line-level
//! reconciliation is delegated to a [`TextMerger`]; this crate decides which
//! path and mode the result carries and how every buffer is owned.
//!
//! # Flow
//!
//! 1. Build one [`MergeInput`] per side with a normalizer
//!    ([`normalize_from_file`], [`normalize_from_store`],
//!    [`normalize_from_index_entry`], [`normalize_from_diff_file`]).
//! 2. Call [`merge_inputs`], which resolves path and mode
//!    ([`best_path`], [`best_mode`]) and runs the engine once.
//! 3. Read the [`MergeResult`].
//!
//! [`merge_files`], [`merge_from_index`] and [`merge_from_diff_files`] run all
//! three steps from a [`MergeFileOptions`].
//!
//! # Result contract
//!
//! - `automergeable` is `true` iff the engine left no conflicts.
//! - `path == None` means the path could not be resolved; the caller decides.
//! - `mode == FileMode::ABSENT` means the modes conflict.
//! - If ours or theirs is absent no merge runs at all and the result is the
//!   empty default (see [`MergeResult::is_merged`]); delete/modify handling is
//!   left to the caller.

pub mod error;
pub mod input;
pub mod merge;
pub mod normalize;
pub mod options;
pub mod resolve;
pub mod result;

pub use error::MergeError;
pub use input::{InputContent, MergeInput};
pub use merge::{merge_files, merge_from_diff_files, merge_from_index, merge_inputs};
pub use normalize::{
    normalize_from_diff_file, normalize_from_file, normalize_from_index_entry,
    normalize_from_store,
};
pub use options::{MergeFavor, MergeFileOptions, MergeFlags};
pub use resolve::{best_mode, best_path};
pub use result::MergeResult;

pub use trimerge_xdiff::{
    EngineConfig, EngineError, EngineResult, LineMerger, MergeOutput, MergeParams, MergedBuffer,
    TextMerger,
};
