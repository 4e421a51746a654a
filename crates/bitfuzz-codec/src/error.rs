//! Error types for bit-string encoding and payload schema operations.
//!
//! Strongly-typed errors for the four failure kinds a schema or conversion
//! can raise. We avoid print-and-return-`false` reporting so that callers
//! can match on the specific cause and decide recovery themselves.

use thiserror::Error;

/// Errors raised while encoding, decoding, or describing payload schemas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A value could not be parsed under its declared format (bad digits,
    /// odd-length hex, malformed MAC/IP literal).
    #[error("malformed {what}: {value:?}")]
    Malformed {
        /// What kind of value failed to parse (e.g. "hex digit", "MAC address").
        what: &'static str,
        /// The offending input.
        value: String,
    },

    /// A schema field is missing a required option, or declares a format or
    /// type this crate does not recognise.
    #[error("schema error on field {field}: {reason}")]
    SchemaError {
        /// Index of the offending field.
        field: usize,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// An assembled bit-string is not a multiple of 8 bits and cannot be
    /// packed into bytes.
    #[error("unaligned bit-string of length {bits} (not a multiple of 8)")]
    Unaligned {
        /// The bit-string length that failed alignment.
        bits: usize,
    },

    /// A schema accessor was called with an index past `field_count()`.
    #[error("field index {index} out of range (field_count = {field_count})")]
    IndexOutOfRange {
        /// Index that was requested.
        index: usize,
        /// Number of fields actually present.
        field_count: usize,
    },
}

/// Convenience alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, CodecError>;
