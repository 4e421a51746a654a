//! Error types for raw-socket lifecycle and framing operations.

use thiserror::Error;

/// Errors raised while constructing, configuring, or using a raw-socket
/// protocol sender.
#[derive(Error, Debug)]
pub enum NetError {
    /// The named interface could not be resolved to a kernel index.
    #[error("invalid network interface: {interface}")]
    InvalidInterface {
        /// The interface name that failed to resolve.
        interface: String,
    },

    /// An operation was attempted in a state that does not permit it
    /// (e.g. `send` before `create`, or any call after `kill`).
    #[error("operation not permitted in state {state}")]
    InvalidState {
        /// Name of the sender's current state.
        state: &'static str,
    },

    /// A required option was missing for the requested layer (e.g.
    /// `SOURCE_MAC` for `raw2`).
    #[error("missing required option {option} for layer {layer}")]
    MissingOption {
        /// The missing option's name.
        option: &'static str,
        /// The layer that required it.
        layer: &'static str,
    },

    /// A syscall (`socket`, `bind`, `setsockopt`, `send`, ...) failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, NetError>;
