#![allow(unsafe_code)]
//! The only module in this crate (and the workspace) where `unsafe`
//! appears: direct `socket(2)`/`bind(2)`/`setsockopt(2)`/`write(2)`
//! invocations for the `AF_PACKET` layer-2 path and the `IP_HDRINCL`
//! option that `socket2`'s safe API does not model. Layer-3/4 sockets are
//! built entirely through `socket2` and never call into this module.

use std::ffi::CString;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};

use crate::error::{NetError, Result};

/// Resolve a network interface name to its kernel interface index via
/// `if_nametoindex(3)`.
pub fn if_index(interface: &str) -> Result<u32> {
    let c_name = CString::new(interface)
        .map_err(|_| NetError::InvalidInterface { interface: interface.to_string() })?;
    // SAFETY: `c_name` is NUL-terminated and valid for the call's duration;
    // `if_nametoindex` does not retain the pointer past the call.
    let index = unsafe { libc::if_nametoindex(c_name.as_ptr()) };
    if index == 0 {
        return Err(NetError::InvalidInterface { interface: interface.to_string() });
    }
    Ok(index)
}

/// Open an `AF_PACKET`/`SOCK_RAW` socket filtering on `ether_type` and bind
/// it to `interface`.
pub fn open_raw_l2(interface: &str, ether_type: u16) -> Result<OwnedFd> {
    let index = if_index(interface)?;
    let protocol = i32::from(ether_type.to_be());

    // SAFETY: a plain `socket(2)` call with constant, valid arguments. The
    // descriptor is wrapped in `OwnedFd` immediately below so it is never
    // leaked or double-closed.
    let fd = unsafe { libc::socket(libc::AF_PACKET, libc::SOCK_RAW, protocol) };
    if fd < 0 {
        return Err(NetError::Io(io::Error::last_os_error()));
    }
    // SAFETY: `fd` was just returned by `socket(2)` and has not been
    // touched by anything else yet.
    let owned = unsafe { OwnedFd::from_raw_fd(fd) };

    // SAFETY: `sockaddr_ll` is a plain-old-data FFI type; zero-initializing
    // it and then setting its fields is valid for every field we touch.
    let mut addr: libc::sockaddr_ll = unsafe { std::mem::zeroed() };
    addr.sll_family = libc::AF_PACKET as u16;
    addr.sll_protocol = protocol as u16;
    addr.sll_ifindex = index as i32;

    // SAFETY: `addr` is a fully initialized `sockaddr_ll` whose size
    // matches the `addrlen` argument; `owned` is a live descriptor for
    // the duration of the call.
    let result = unsafe {
        libc::bind(
            owned.as_raw_fd(),
            std::ptr::addr_of!(addr).cast::<libc::sockaddr>(),
            std::mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
        )
    };
    if result < 0 {
        return Err(NetError::Io(io::Error::last_os_error()));
    }
    Ok(owned)
}

/// Write `frame` to `fd` with a single `write(2)` call.
pub fn send_raw(fd: &OwnedFd, frame: &[u8]) -> Result<usize> {
    // SAFETY: `frame` is a valid slice for its own length; `fd` is a live
    // descriptor owned by the caller for the duration of the call.
    let n = unsafe { libc::write(fd.as_raw_fd(), frame.as_ptr().cast(), frame.len()) };
    if n < 0 {
        return Err(NetError::Io(io::Error::last_os_error()));
    }
    Ok(n as usize)
}

/// Set `IP_HDRINCL` on a raw IP socket so the caller supplies the IP
/// header itself.
pub fn set_ip_hdrincl(fd: RawFd) -> Result<()> {
    let enable: libc::c_int = 1;
    // SAFETY: `fd` is a live raw-socket descriptor owned by the caller;
    // `enable` is a valid, correctly-sized `c_int` for `setsockopt`.
    let result = unsafe {
        libc::setsockopt(
            fd,
            libc::IPPROTO_IP,
            libc::IP_HDRINCL,
            std::ptr::addr_of!(enable).cast::<libc::c_void>(),
            std::mem::size_of::<libc::c_int>() as libc::socklen_t,
        )
    };
    if result < 0 {
        return Err(NetError::Io(io::Error::last_os_error()));
    }
    Ok(())
}
