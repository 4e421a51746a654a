//! Layer selection and the per-layer options a [`crate::sender::ProtocolSender`]
//! is constructed with.

use std::net::IpAddr;

/// Which OSI layer a [`crate::sender::ProtocolSender`] operates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Ethernet framing over an `AF_PACKET` socket.
    Raw2,
    /// Raw IP datagrams.
    Raw3,
    /// Raw IP datagrams with transport-layer addressing (ports, protocol
    /// number, optional broadcast).
    Raw4,
}

impl Layer {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Layer::Raw2 => "raw2",
            Layer::Raw3 => "raw3",
            Layer::Raw4 => "raw4",
        }
    }
}

/// IP version for a [`Layer::Raw3`] or [`Layer::Raw4`] sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    /// IPv4.
    V4,
    /// IPv6.
    V6,
}

/// Options accepted by [`crate::sender::ProtocolSender::new`]. Which fields
/// are required depends on the selected [`Layer`]; `create` reports a
/// [`crate::error::NetError::MissingOption`] for anything the layer needs
/// but was not supplied.
#[derive(Debug, Clone, Default)]
pub struct SenderOptions {
    pub(crate) source_mac: Option<[u8; 6]>,
    pub(crate) destination_mac: Option<[u8; 6]>,
    pub(crate) ether_type: Option<u16>,
    pub(crate) source_ip: Option<IpAddr>,
    pub(crate) destination_ip: Option<IpAddr>,
    pub(crate) ip_version: Option<IpVersion>,
    pub(crate) proto: Option<i32>,
    pub(crate) source_port: Option<u16>,
    pub(crate) destination_port: Option<u16>,
    pub(crate) broadcast: bool,
}

impl SenderOptions {
    /// Start building an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `raw2`: the frame's source MAC address.
    #[must_use]
    pub fn source_mac(mut self, mac: [u8; 6]) -> Self {
        self.source_mac = Some(mac);
        self
    }

    /// `raw2`: the frame's destination MAC address.
    #[must_use]
    pub fn destination_mac(mut self, mac: [u8; 6]) -> Self {
        self.destination_mac = Some(mac);
        self
    }

    /// `raw2`: the EtherType the socket filters on and stamps into the
    /// frame header.
    #[must_use]
    pub fn ether_type(mut self, ether_type: u16) -> Self {
        self.ether_type = Some(ether_type);
        self
    }

    /// `raw3`/`raw4`: the source IP address.
    #[must_use]
    pub fn source_ip(mut self, ip: IpAddr) -> Self {
        self.source_ip = Some(ip);
        self
    }

    /// `raw3`/`raw4`: the destination IP address.
    #[must_use]
    pub fn destination_ip(mut self, ip: IpAddr) -> Self {
        self.destination_ip = Some(ip);
        self
    }

    /// `raw3`/`raw4`: which IP version the socket is opened for.
    #[must_use]
    pub fn ip_version(mut self, version: IpVersion) -> Self {
        self.ip_version = Some(version);
        self
    }

    /// `raw4`: the transport protocol number (e.g. `libc::IPPROTO_TCP`).
    #[must_use]
    pub fn proto(mut self, proto: i32) -> Self {
        self.proto = Some(proto);
        self
    }

    /// `raw4`: the source port.
    #[must_use]
    pub fn source_port(mut self, port: u16) -> Self {
        self.source_port = Some(port);
        self
    }

    /// `raw4`: the destination port.
    #[must_use]
    pub fn destination_port(mut self, port: u16) -> Self {
        self.destination_port = Some(port);
        self
    }

    /// `raw4`: send in broadcast mode (address reuse + `SO_BROADCAST` +
    /// connectionless `send_to`) instead of connecting and streaming.
    #[must_use]
    pub fn broadcast(mut self, broadcast: bool) -> Self {
        self.broadcast = broadcast;
        self
    }
}
