//! Error types for the transmission driver.

use thiserror::Error;

/// Errors raised while driving a mutation engine through a sender.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The mutation engine reported an unrecoverable failure (anything
    /// other than a per-candidate alignment skip, which the engine
    /// already handles internally).
    #[error(transparent)]
    Mutate(#[from] bitfuzz_mutate::MutateError),

    /// The sender's `send` or `kill` failed.
    #[error("sender operation failed: {0}")]
    Send(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Convenience alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, DriverError>;
