//! Mutation kernels and the mutation engine for the bitfuzz packet fuzzer.
//!
//! Builds on [`bitfuzz_codec`]'s canonical bit-string form and [`Payload`]
//! schema: [`binary`] and [`random`] generate per-field mutation sets,
//! [`engine`] orchestrates conversion, per-field mutation, Cartesian-product
//! enumeration, and unbounded random continuation.
//!
//! [`Payload`]: bitfuzz_codec::Payload

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod binary;
pub mod engine;
pub mod error;
pub mod random;

pub use engine::{Candidate, EngineOptions, MutationEngine};
pub use error::{MutateError, Result};
