use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use udplink::session::{DatagramSession, SessionConfig};
use udplink::{cli, CliArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "udplink=info".into()),
        )
        .init();

    let args = match CliArgs::from_env() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!();
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    // All startup validation happens before any socket is opened.
    let payload = args
        .file
        .as_deref()
        .map(|path| udplink::load_payload(path, udplink::MAX_MESSAGE_SIZE))
        .transpose()
        .wrap_err("Failed to load outbound payload")?;
    let peer = args.peer_addr().wrap_err("Failed to resolve peer address")?;

    info!(%peer, local_port = ?args.local_port, payload = payload.is_some(), "starting udplink");

    let config = SessionConfig {
        local_port: args.local_port,
        ..SessionConfig::default()
    };
    let session = DatagramSession::open(config).wrap_err("Failed to open datagram session")?;
    session
        .run(Some(peer), payload)
        .await
        .wrap_err("Datagram session terminated")?;

    Ok(())
}
