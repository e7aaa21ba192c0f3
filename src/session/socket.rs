// Socket setup below the tokio layer.
//
// The send buffer is configured with SO_SNDBUF on the raw fd because the
// receiving side reads at most `max_message_size` bytes per datagram; keeping
// the send buffer at the same bound keeps both ends of the link on the same
// message-size contract.

use crate::Result;
use std::net::{SocketAddr, UdpSocket};
use std::os::unix::io::AsRawFd;
use tracing::info;

/// Binds a std UDP socket, configures its send buffer, and prepares it for
/// registration with the tokio runtime.
///
/// `local_port: None` binds to port 0 and lets the OS assign an ephemeral
/// port, which is what one-shot sender mode wants; listener mode passes the
/// port it advertises to peers.
pub(super) fn bind(local_port: Option<u16>, max_message_size: usize) -> Result<UdpSocket> {
    let bind_addr = SocketAddr::from(([0, 0, 0, 0], local_port.unwrap_or(0)));
    if local_port.is_some() {
        info!(address = %bind_addr, "binding to local port");
    }
    let socket = UdpSocket::bind(bind_addr)?;

    // Before/after values are purely diagnostic; Linux in particular doubles
    // the requested value for bookkeeping overhead.
    info!(size = send_buffer_size(&socket)?, "send buffer size [before]");
    set_send_buffer_size(&socket, max_message_size)?;
    info!(size = send_buffer_size(&socket)?, "send buffer size [after]");

    // Tokio requires non-blocking sockets for proper async behavior
    socket.set_nonblocking(true)?;
    Ok(socket)
}

fn send_buffer_size(socket: &UdpSocket) -> std::io::Result<usize> {
    let mut size: libc::c_int = 0;
    let mut len = std::mem::size_of::<libc::c_int>() as libc::socklen_t;
    let rc = unsafe {
        libc::getsockopt(
            socket.as_raw_fd(),
            libc::SOL_SOCKET,
            libc::SO_SNDBUF,
            &mut size as *mut libc::c_int as *mut libc::c_void,
            &mut len,
        )
    };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(size as usize)
}

fn set_send_buffer_size(socket: &UdpSocket, size: usize) -> std::io::Result<()> {
    let value = size as libc::c_int;
    let rc = unsafe {
        libc::setsockopt(
            socket.as_raw_fd(),
            libc::SOL_SOCKET,
            libc::SO_SNDBUF,
            &value as *const libc::c_int as *const libc::c_void,
            std::mem::size_of::<libc::c_int>() as libc::socklen_t,
        )
    };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}
