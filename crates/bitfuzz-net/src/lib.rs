//! Raw-socket protocol sender for the bitfuzz packet fuzzer: layer-2
//! Ethernet framing, and layer-3/4 raw IP sockets via `socket2`.
//!
//! `unsafe` is confined entirely to [`raw_socket`] (the `AF_PACKET`
//! lifecycle and the `IP_HDRINCL` option `socket2` does not model); it is
//! the only module in the workspace that overrides the workspace-wide
//! `unsafe_code` lint.

#![deny(missing_docs)]

pub mod error;
pub mod frame;
pub mod layer;
pub mod raw_socket;
pub mod sender;

pub use error::{NetError, Result};
pub use layer::{IpVersion, Layer, SenderOptions};
pub use sender::ProtocolSender;
