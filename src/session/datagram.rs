use super::config::{SessionConfig, MAX_MESSAGE_SIZE};
use super::socket;
use crate::{LinkError, Result};

use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::{net::UdpSocket, signal, sync::Mutex, time::sleep};
use tracing::{debug, info, warn};

/// Mutable state shared between the sender and receiver loops.
///
/// Guarded by a single mutex so that at most one loop mutates it at a time.
/// `pending` is a one-slot mailbox: storing a new payload before the sender
/// consumes the old one overwrites it. That is a known limitation of the
/// tool, not a queue waiting to be built.
#[derive(Debug, Default)]
struct LinkState {
    peer: Option<SocketAddr>,
    pending: Option<Bytes>,
}

/// A bidirectional UDP session over a single socket
///
/// The session owns one UDP socket for its entire lifetime and runs two
/// concurrent loops: a receiver that prints every inbound datagram and
/// retargets the peer to the datagram's source address ("reply-to"
/// semantics), and a sender that transmits the pending payload once to the
/// current peer and clears it. Best effort only: no retry, no acknowledgment,
/// no ordering.
///
/// # Examples
///
/// A listener that answers whoever contacts it first:
///
/// ```no_run
/// use udplink::session::{DatagramSession, SessionConfig};
/// use bytes::Bytes;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = SessionConfig {
///         local_port: Some(20001),
///         ..SessionConfig::default()
///     };
///     let session = DatagramSession::open(config)?;
///     session.run(None, Some(Bytes::from_static(b"pong"))).await?;
///     Ok(())
/// }
/// ```
pub struct DatagramSession {
    socket: Arc<UdpSocket>,
    config: SessionConfig,
}

impl DatagramSession {
    /// Creates the socket for a new session.
    ///
    /// Binds to `config.local_port` (ephemeral if `None`) and sets the
    /// socket's send buffer to `config.max_message_size`. Fails with
    /// [`LinkError::Config`] when the size falls outside the shared cap and
    /// with [`LinkError::Socket`] when the OS refuses the bind or the
    /// buffer-size request.
    pub fn open(config: SessionConfig) -> Result<Self> {
        if config.max_message_size == 0 || config.max_message_size > MAX_MESSAGE_SIZE {
            return Err(LinkError::Config(format!(
                "max message size {} must be between 1 and {} bytes",
                config.max_message_size, MAX_MESSAGE_SIZE
            )));
        }

        let std_socket = socket::bind(config.local_port, config.max_message_size)?;
        let socket = UdpSocket::from_std(std_socket)?;
        Ok(Self {
            socket: Arc::new(socket),
            config,
        })
    }

    /// Address the session's socket is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Runs the sender and receiver loops until a socket error or Ctrl-C.
    ///
    /// `initial_peer` is where the first send goes; any received datagram
    /// replaces it with the sender's address. `initial_payload` fills the
    /// pending slot; it is sent at most once. Both loops share one task, so
    /// the peer/payload state never sees concurrent mutation.
    pub async fn run(
        self,
        initial_peer: Option<SocketAddr>,
        initial_payload: Option<Bytes>,
    ) -> Result<()> {
        let state = Arc::new(Mutex::new(LinkState {
            peer: initial_peer,
            pending: initial_payload,
        }));

        info!(address = %self.local_addr()?, "datagram session running");

        tokio::select! {
            res = Self::receive_loop(
                Arc::clone(&self.socket),
                Arc::clone(&state),
                self.config.max_message_size,
            ) => res,
            res = Self::send_loop(
                Arc::clone(&self.socket),
                Arc::clone(&state),
                self.config.idle_interval,
            ) => res,
            _ = signal::ctrl_c() => {
                info!("received interrupt, closing session");
                Ok(())
            }
        }
    }

    /// Blocks on the socket and reports every decodable datagram.
    ///
    /// The receive buffer length is the same `max_message_size` the sender
    /// side validates against; anything past it would be silently discarded
    /// by the OS, which is exactly the truncation the shared cap prevents.
    async fn receive_loop(
        socket: Arc<UdpSocket>,
        state: Arc<Mutex<LinkState>>,
        max_message_size: usize,
    ) -> Result<()> {
        let mut buffer = vec![0u8; max_message_size];
        loop {
            debug!("ready to receive");
            let (n, addr) = socket.recv_from(&mut buffer).await.map_err(LinkError::Socket)?;
            match std::str::from_utf8(&buffer[..n]) {
                Ok(text) => {
                    // Reply-to semantics: future sends target whoever spoke last.
                    state.lock().await.peer = Some(addr);
                    info!(peer = %addr, size = n, "new data: {text}");
                }
                Err(e) => {
                    let err = LinkError::Decode(e);
                    warn!(peer = %addr, size = n, error = %err, "dropping undecodable datagram");
                }
            }
        }
    }

    /// Transmits the pending payload once and clears the slot.
    ///
    /// Fire-and-forget: UDP gives no confirmation, so the slot is consumed on
    /// the send attempt. With nothing to send the loop idles instead of
    /// spinning.
    async fn send_loop(
        socket: Arc<UdpSocket>,
        state: Arc<Mutex<LinkState>>,
        idle_interval: Duration,
    ) -> Result<()> {
        loop {
            let outbound = {
                let mut state = state.lock().await;
                let peer = state.peer;
                match peer {
                    Some(peer) if state.pending.is_some() => {
                        state.pending.take().map(|payload| (payload, peer))
                    }
                    _ => None,
                }
            };

            if let Some((payload, peer)) = outbound {
                info!(%peer, size = payload.len(), "sending payload to peer");
                socket
                    .send_to(&payload, peer)
                    .await
                    .map_err(LinkError::Socket)?;
            }

            sleep(idle_interval).await;
        }
    }
}
