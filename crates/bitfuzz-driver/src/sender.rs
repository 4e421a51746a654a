//! The driver-facing sender contract. Decouples [`crate::driver::Driver`]
//! from any concrete transport so tests can drive it with an in-memory
//! double instead of a real raw socket.

/// Anything the driver can hand assembled candidates to and eventually
/// close. [`bitfuzz_net::ProtocolSender`] is the production implementation.
pub trait Sender {
    /// The error type this sender's operations can fail with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transmit `data`. Returns the number of bytes actually sent.
    fn send(&mut self, data: &[u8]) -> std::result::Result<usize, Self::Error>;

    /// Release the underlying resource. Always legal to call, including
    /// more than once.
    fn kill(&mut self) -> std::result::Result<(), Self::Error>;
}

impl Sender for bitfuzz_net::ProtocolSender {
    type Error = bitfuzz_net::NetError;

    fn send(&mut self, data: &[u8]) -> std::result::Result<usize, Self::Error> {
        bitfuzz_net::ProtocolSender::send(self, data)
    }

    fn kill(&mut self) -> std::result::Result<(), Self::Error> {
        bitfuzz_net::ProtocolSender::kill(self)
    }
}
