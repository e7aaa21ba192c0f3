pub mod config;
pub mod datagram;
pub mod socket;
pub mod tests;

pub use config::{SessionConfig, MAX_MESSAGE_SIZE};
pub use datagram::DatagramSession;
