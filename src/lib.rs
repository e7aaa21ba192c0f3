use thiserror::Error;

/// Error types for the udplink library
#[derive(Error, Debug)]
pub enum LinkError {
    /// Invalid command line arguments, payload file, or session configuration.
    /// Surfaced at startup, before any socket is opened.
    #[error("configuration error: {0}")]
    Config(String),

    /// Socket-level failures (bind, sockopt, send, receive). Always fatal:
    /// the run loop terminates and the socket is released on the way out.
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),

    /// Inbound datagram is not valid UTF-8 text. The only recoverable kind:
    /// the receiver logs it, drops the datagram, and keeps listening.
    #[error("decode error: {0}")]
    Decode(#[from] std::str::Utf8Error),
}

/// Result type for the udplink library
pub type Result<T> = std::result::Result<T, LinkError>;

pub mod cli;
pub mod payload;
pub mod session;

// Re-export main types for convenience
pub use cli::CliArgs;
pub use payload::load_payload;
pub use session::{DatagramSession, SessionConfig, MAX_MESSAGE_SIZE};
