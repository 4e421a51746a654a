//! Error types for the mutation kernels and the mutation engine.

use thiserror::Error;

/// Errors raised while generating mutations or driving the mutation engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutateError {
    /// A codec-level failure (bad schema, unaligned bit-string) surfaced
    /// while the engine decoded a field's canonical bits.
    #[error(transparent)]
    Codec(#[from] bitfuzz_codec::CodecError),

    /// The engine was asked to advance a field index past the payload's
    /// field count.
    #[error("field index {index} out of range (field_count = {field_count})")]
    FieldOutOfRange {
        /// Index that was requested.
        index: usize,
        /// Number of fields actually present in the payload.
        field_count: usize,
    },

    /// A random mutation kernel was asked for more candidates than it can
    /// produce (e.g. `count == 0`).
    #[error("invalid mutation count: {count}")]
    InvalidCount {
        /// The offending count.
        count: usize,
    },
}

/// Convenience alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, MutateError>;
