//! One-shot payload loading and validation.
//!
//! The payload is read once at startup and must be rejected here, before any
//! socket exists, when it cannot legally cross the link: the receiving side
//! reads at most `max_message_size` bytes per datagram and the OS discards
//! the rest.

use crate::{LinkError, Result};
use bytes::Bytes;
use std::path::Path;

/// Reads the whole file as the outbound payload, with trailing whitespace
/// stripped.
///
/// Fails with [`LinkError::Config`] when the file cannot be read, is empty
/// after trimming, or is at or above `max_message_size` bytes.
pub fn load_payload(path: &Path, max_message_size: usize) -> Result<Bytes> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        LinkError::Config(format!("failed to read payload file {}: {e}", path.display()))
    })?;

    let message = raw.trim_end();
    if message.is_empty() {
        return Err(LinkError::Config(format!(
            "no message in payload file {}",
            path.display()
        )));
    }
    if message.len() >= max_message_size {
        return Err(LinkError::Config(format!(
            "message size {} is over the maximum of {} bytes",
            message.len(),
            max_message_size
        )));
    }

    Ok(Bytes::copy_from_slice(message.as_bytes()))
}
