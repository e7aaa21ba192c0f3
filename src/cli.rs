//! Command line surface.
//!
//! The flags are single-dash (`-file`, `-ipr`, `-portr`, `-portl`), so
//! parsing is done by hand over `std::env::args` instead of through a
//! derive-style parser.

use crate::{LinkError, Result};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

pub const USAGE: &str = "Usage: udplink [-file <path>] [-ipr <host>] [-portr <port>] [-portl <port>]
  -file <path>   file whose content is sent once to the peer (omit for listener-only mode)
  -ipr <host>    remote peer host (default: 192.168.1.6)
  -portr <port>  remote peer port (default: 20000)
  -portl <port>  local port to bind (default: OS-assigned ephemeral port)

Examples:
  udplink -portl 20001                              # listener
  udplink -file msg.txt -ipr 127.0.0.1 -portr 20001 # one-shot sender";

const DEFAULT_REMOTE_HOST: &str = "192.168.1.6";
const DEFAULT_REMOTE_PORT: u16 = 20000;

/// Parsed command line arguments
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Payload file; `None` means listener-only mode
    pub file: Option<PathBuf>,
    pub remote_host: String,
    pub remote_port: u16,
    pub local_port: Option<u16>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            file: None,
            remote_host: DEFAULT_REMOTE_HOST.to_string(),
            remote_port: DEFAULT_REMOTE_PORT,
            local_port: None,
        }
    }
}

impl CliArgs {
    /// Parses flags from an iterator over arguments, excluding the program
    /// name. Unknown flags, missing values, and unparsable ports are all
    /// [`LinkError::Config`].
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "-file" => parsed.file = Some(PathBuf::from(next_value(&mut args, &flag)?)),
                "-ipr" => parsed.remote_host = next_value(&mut args, &flag)?,
                "-portr" => parsed.remote_port = parse_port(&flag, &next_value(&mut args, &flag)?)?,
                "-portl" => {
                    parsed.local_port = Some(parse_port(&flag, &next_value(&mut args, &flag)?)?)
                }
                _ => {
                    return Err(LinkError::Config(format!("unrecognized flag: {flag}")));
                }
            }
        }

        Ok(parsed)
    }

    /// Parses the process arguments
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1))
    }

    /// Resolves the configured remote endpoint. The defaults apply even when
    /// no remote flag was given, so a sender always has an initial peer.
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        (self.remote_host.as_str(), self.remote_port)
            .to_socket_addrs()
            .map_err(|e| {
                LinkError::Config(format!(
                    "cannot resolve peer {}:{}: {e}",
                    self.remote_host, self.remote_port
                ))
            })?
            .next()
            .ok_or_else(|| {
                LinkError::Config(format!(
                    "peer {}:{} resolved to no address",
                    self.remote_host, self.remote_port
                ))
            })
    }
}

fn next_value<I>(args: &mut I, flag: &str) -> Result<String>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| LinkError::Config(format!("flag {flag} requires a value")))
}

fn parse_port(flag: &str, value: &str) -> Result<u16> {
    value
        .parse::<u16>()
        .map_err(|_| LinkError::Config(format!("flag {flag} expects a port number, got {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use crate::LinkError;

    fn parse(args: &[&str]) -> crate::Result<CliArgs> {
        CliArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.file, None);
        assert_eq!(args.remote_host, "192.168.1.6");
        assert_eq!(args.remote_port, 20000);
        assert_eq!(args.local_port, None);
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "-file", "msg.txt", "-ipr", "127.0.0.1", "-portr", "20001", "-portl", "20002",
        ])
        .unwrap();
        assert_eq!(args.file.as_deref().unwrap().to_str(), Some("msg.txt"));
        assert_eq!(args.remote_host, "127.0.0.1");
        assert_eq!(args.remote_port, 20001);
        assert_eq!(args.local_port, Some(20002));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(matches!(parse(&["-frobnicate"]), Err(LinkError::Config(_))));
    }

    #[test]
    fn test_missing_value_rejected() {
        assert!(matches!(parse(&["-file"]), Err(LinkError::Config(_))));
    }

    #[test]
    fn test_bad_port_rejected() {
        assert!(matches!(
            parse(&["-portr", "notaport"]),
            Err(LinkError::Config(_))
        ));
        assert!(matches!(
            parse(&["-portl", "70000"]),
            Err(LinkError::Config(_))
        ));
    }

    #[test]
    fn test_peer_addr_resolves_defaults() {
        let args = parse(&["-ipr", "127.0.0.1", "-portr", "20001"]).unwrap();
        let addr = args.peer_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:20001");
    }
}
