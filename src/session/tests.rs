#[cfg(test)]
mod tests {
    use crate::session::{DatagramSession, SessionConfig, MAX_MESSAGE_SIZE};
    use crate::LinkError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.local_port, None);
        assert_eq!(config.max_message_size, MAX_MESSAGE_SIZE);
        assert_eq!(config.idle_interval, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_open_ephemeral_port() {
        let session = DatagramSession::open(SessionConfig::default()).unwrap();
        let addr = session.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_open_explicit_port() {
        // Grab a free port first, then reopen on it explicitly.
        let probe = DatagramSession::open(SessionConfig::default()).unwrap();
        let port = probe.local_addr().unwrap().port();
        drop(probe);

        let config = SessionConfig {
            local_port: Some(port),
            ..SessionConfig::default()
        };
        let session = DatagramSession::open(config).unwrap();
        assert_eq!(session.local_addr().unwrap().port(), port);
    }

    #[tokio::test]
    async fn test_open_rejects_zero_message_size() {
        let config = SessionConfig {
            max_message_size: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            DatagramSession::open(config),
            Err(LinkError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_open_rejects_oversized_message_size() {
        let config = SessionConfig {
            max_message_size: MAX_MESSAGE_SIZE + 1,
            ..SessionConfig::default()
        };
        assert!(matches!(
            DatagramSession::open(config),
            Err(LinkError::Config(_))
        ));
    }
}
