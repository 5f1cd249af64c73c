//! Line-level three-way text merge for trimerge.
//!
//! Given an ancestor and two descendants as raw bytes, produces one merged
//! buffer plus the number of conflicts left in it. Line matching uses the
//! `similar` crate (Myers diff); the merge itself is a classic diff3 walk over
//! the two ancestor-relative change sets.
//!
//! # Key Types
//!
//! - [`TextMerger`] -- The engine interface the merge core calls
//! - [`LineMerger`] -- The built-in line-based implementation
//! - [`MergeParams`] -- Labels, [`Favor`], [`Level`], [`Style`]
//! - [`MergedBuffer`] -- Engine-owned output bytes

pub mod buffer;
pub mod error;
mod hunks;
pub mod merge;
pub mod params;

pub use buffer::MergedBuffer;
pub use error::{EngineError, EngineResult};
pub use merge::{EngineConfig, LineMerger, MergeOutput, TextMerger};
pub use params::{Favor, Level, MergeParams, Style};
