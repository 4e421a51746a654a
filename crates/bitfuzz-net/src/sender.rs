//! The raw-socket protocol sender: a small `NEW → BOUND → SENDING →
//! CLOSED` state machine wrapping a layer-2, -3, or -4 socket.

use std::net::SocketAddr;
use std::os::fd::{AsRawFd, OwnedFd};

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use crate::{
    error::{NetError, Result},
    frame,
    layer::{IpVersion, Layer, SenderOptions},
    raw_socket,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SenderState {
    New,
    Bound,
    Sending,
    Closed,
}

impl SenderState {
    fn name(self) -> &'static str {
        match self {
            SenderState::New => "NEW",
            SenderState::Bound => "BOUND",
            SenderState::Sending => "SENDING",
            SenderState::Closed => "CLOSED",
        }
    }
}

enum Handle {
    Layer2 { fd: OwnedFd, destination_mac: [u8; 6], source_mac: [u8; 6], ether_type: u16 },
    Socket { socket: Socket, peer: Option<SockAddr>, broadcast: bool },
}

/// Opens, addresses, and tears down a raw socket at a declared [`Layer`],
/// exposing the lifecycle as `create` / `send` / `kill`.
pub struct ProtocolSender {
    layer: Layer,
    options: SenderOptions,
    state: SenderState,
    handle: Option<Handle>,
}

impl ProtocolSender {
    /// Construct a sender for `layer` with the given `options`. Performs no
    /// I/O; the socket is opened on the first [`ProtocolSender::create`].
    #[must_use]
    pub fn new(layer: Layer, options: SenderOptions) -> Self {
        Self { layer, options, state: SenderState::New, handle: None }
    }

    /// Which layer this sender operates at.
    #[must_use]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Open (or, if already bound, no-op on) the socket for `interface`.
    /// Idempotent: calling `create` again while already `BOUND` or
    /// `SENDING` returns immediately without reopening the socket.
    pub fn create(&mut self, interface: &str) -> Result<()> {
        if matches!(self.state, SenderState::Bound | SenderState::Sending) {
            return Ok(());
        }

        let handle = match self.layer {
            Layer::Raw2 => self.open_layer2(interface)?,
            Layer::Raw3 => self.open_layer3(interface)?,
            Layer::Raw4 => self.open_layer4(interface)?,
        };

        self.handle = Some(handle);
        self.state = SenderState::Bound;
        tracing::debug!(layer = self.layer.name(), interface, "socket bound");
        Ok(())
    }

    /// Send `data` over the socket. Requires `BOUND` or `SENDING`.
    pub fn send(&mut self, data: &[u8]) -> Result<usize> {
        if !matches!(self.state, SenderState::Bound | SenderState::Sending) {
            return Err(NetError::InvalidState { state: self.state.name() });
        }
        let handle = self.handle.as_ref().ok_or(NetError::InvalidState { state: self.state.name() })?;

        let sent = match handle {
            Handle::Layer2 { fd, destination_mac, source_mac, ether_type } => {
                let frame = frame::assemble_l2_frame(*destination_mac, *source_mac, *ether_type, data);
                raw_socket::send_raw(fd, &frame)?
            },
            Handle::Socket { socket, peer, broadcast } => {
                if *broadcast {
                    let peer = peer.as_ref().ok_or(NetError::MissingOption {
                        option: "DESTINATION_IP",
                        layer: self.layer.name(),
                    })?;
                    socket.send_to(data, peer)?
                } else {
                    socket.send(data)?
                }
            },
        };
        self.state = SenderState::Sending;
        Ok(sent)
    }

    /// Close the socket. Always legal; drops to `CLOSED` unconditionally.
    pub fn kill(&mut self) -> Result<()> {
        self.handle = None;
        self.state = SenderState::Closed;
        tracing::debug!(layer = self.layer.name(), "socket closed");
        Ok(())
    }

    fn open_layer2(&self, interface: &str) -> Result<Handle> {
        let source_mac = self
            .options
            .source_mac
            .ok_or(NetError::MissingOption { option: "SOURCE_MAC", layer: "raw2" })?;
        let destination_mac = self
            .options
            .destination_mac
            .ok_or(NetError::MissingOption { option: "DESTINATION_MAC", layer: "raw2" })?;
        let ether_type = self
            .options
            .ether_type
            .ok_or(NetError::MissingOption { option: "ETHER_TYPE", layer: "raw2" })?;

        let fd = raw_socket::open_raw_l2(interface, ether_type)?;
        Ok(Handle::Layer2 { fd, destination_mac, source_mac, ether_type })
    }

    fn open_layer3(&self, interface: &str) -> Result<Handle> {
        let ip_version = self
            .options
            .ip_version
            .ok_or(NetError::MissingOption { option: "IP_VERSION", layer: "raw3" })?;
        let domain = match ip_version {
            IpVersion::V4 => Domain::IPV4,
            IpVersion::V6 => Domain::IPV6,
        };
        let socket = Socket::new(domain, Type::RAW, Some(Protocol::from(libc::IPPROTO_RAW)))?;
        socket.bind_device(Some(interface.as_bytes()))?;
        raw_socket::set_ip_hdrincl(socket.as_raw_fd())?;

        let peer = self.options.destination_ip.map(|ip| SockAddr::from(SocketAddr::new(ip, 0)));
        Ok(Handle::Socket { socket, peer, broadcast: false })
    }

    fn open_layer4(&self, interface: &str) -> Result<Handle> {
        let ip_version = self
            .options
            .ip_version
            .ok_or(NetError::MissingOption { option: "IP_VERSION", layer: "raw4" })?;
        let proto =
            self.options.proto.ok_or(NetError::MissingOption { option: "PROTO", layer: "raw4" })?;
        let domain = match ip_version {
            IpVersion::V4 => Domain::IPV4,
            IpVersion::V6 => Domain::IPV6,
        };

        let socket = Socket::new(domain, Type::RAW, Some(Protocol::from(proto)))?;
        socket.bind_device(Some(interface.as_bytes()))?;

        let destination_port = self.options.destination_port.unwrap_or(0);
        let peer = self
            .options
            .destination_ip
            .map(|ip| SockAddr::from(SocketAddr::new(ip, destination_port)));

        if self.options.broadcast {
            socket.set_reuse_address(true)?;
            socket.set_broadcast(true)?;
            Ok(Handle::Socket { socket, peer, broadcast: true })
        } else {
            let peer = peer.ok_or(NetError::MissingOption { option: "DESTINATION_IP", layer: "raw4" })?;
            socket.connect(&peer)?;
            Ok(Handle::Socket { socket, peer: None, broadcast: false })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sender_starts_in_new_state() {
        let sender = ProtocolSender::new(Layer::Raw2, SenderOptions::new());
        assert_eq!(sender.state, SenderState::New);
    }

    #[test]
    fn send_before_create_is_invalid_state() {
        let mut sender = ProtocolSender::new(Layer::Raw2, SenderOptions::new());
        assert!(matches!(sender.send(&[0x01]), Err(NetError::InvalidState { state: "NEW" })));
    }

    #[test]
    fn layer2_create_without_required_options_reports_missing_option() {
        let mut sender = ProtocolSender::new(Layer::Raw2, SenderOptions::new());
        let err = sender.create("lo").unwrap_err();
        assert!(matches!(err, NetError::MissingOption { option: "SOURCE_MAC", .. }));
    }

    #[test]
    fn kill_is_always_legal_and_closes() {
        let mut sender = ProtocolSender::new(Layer::Raw2, SenderOptions::new());
        sender.kill().unwrap();
        assert_eq!(sender.state, SenderState::Closed);
        sender.kill().unwrap();
        assert_eq!(sender.state, SenderState::Closed);
    }
}
