//! Error types for the merge engine.

/// Hard failures of the merge engine.
///
/// Textual conflicts are not errors; they are reported through
/// [`MergeOutput::conflicts`](crate::MergeOutput::conflicts).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// One of the inputs exceeds the configured size limit.
    #[error("{side} input is {size} bytes, above the {limit} byte limit")]
    InputTooLarge {
        side: &'static str,
        size: usize,
        limit: usize,
    },
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
