//! Transmission driver for the bitfuzz packet fuzzer: pulls candidates
//! from a [`bitfuzz_mutate::MutationEngine`], paces them, hands them to a
//! [`Sender`], and terminates cleanly when the engine exhausts.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod driver;
pub mod error;
pub mod sender;

pub use config::DriverConfig;
pub use driver::Driver;
pub use error::{DriverError, Result};
pub use sender::Sender;
