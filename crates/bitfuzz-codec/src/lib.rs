//! Canonical bit-string encoding, payload schema, and capture-statistics
//! primitives for the bitfuzz packet fuzzer.
//!
//! This crate is the leaf layer: every other crate in the workspace builds
//! on the canonical bit-string form and the [`Payload`] schema defined
//! here. It has no networking or randomness-consuming mutation logic of
//! its own beyond what the schema needs (the per-field identity hash).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod analyze;
pub mod encoding;
pub mod error;
pub mod payload;

pub use analyze::{payload_analyze, AnalysisReport, DetailLevel};
pub use error::{CodecError, Result};
pub use payload::{BitField, BitLength, FieldOptions, FieldType, Format, Payload};
