use std::time::Duration;

/// Hard cap shared by the send and receive sides of a session.
///
/// A UDP read hands over at most one read-buffer's worth of a datagram and
/// discards the rest, so the sender-side payload validation, the socket's
/// send-buffer size, and the receive buffer length must all agree on this
/// one constant. Changing it in one place without the others reintroduces
/// silent truncation.
pub const MAX_MESSAGE_SIZE: usize = 8192;

/// Configuration for a [`DatagramSession`](super::DatagramSession)
///
/// # Examples
///
/// ```
/// use udplink::session::{SessionConfig, MAX_MESSAGE_SIZE};
///
/// let config = SessionConfig {
///     local_port: Some(20001),
///     ..SessionConfig::default()
/// };
/// assert_eq!(config.max_message_size, MAX_MESSAGE_SIZE);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Local port to bind; `None` lets the OS pick an ephemeral port
    pub local_port: Option<u16>,
    /// Send-buffer size and receive buffer length, at most [`MAX_MESSAGE_SIZE`]
    pub max_message_size: usize,
    /// How long the sender loop sleeps when it has nothing to do
    pub idle_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            local_port: None,
            max_message_size: MAX_MESSAGE_SIZE,
            idle_interval: Duration::from_millis(500),
        }
    }
}
