use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::TransportError;

const TCP_SCHEME: &str = "tcp://";
const UNIX_SCHEME: &str = "unix://";

/// Where a peer listens or connects.
///
/// Accepted forms:
/// - `tcp://host:port` (`*` as host binds all interfaces)
/// - `unix:///path/to.sock`
/// - a bare filesystem path, treated as a Unix domain socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Tcp { host: String, port: u16 },
    Unix(PathBuf),
}

impl Endpoint {
    pub fn parse(input: &str) -> Result<Self, TransportError> {
        let invalid = |reason| TransportError::InvalidEndpoint {
            input: input.to_string(),
            reason,
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid("endpoint must not be empty"));
        }

        if let Some(rest) = trimmed.strip_prefix(TCP_SCHEME) {
            let (host, port) = rest
                .rsplit_once(':')
                .ok_or_else(|| invalid("tcp endpoint needs host:port"))?;
            if host.is_empty() {
                return Err(invalid("tcp endpoint needs a host"));
            }
            let port = port
                .parse::<u16>()
                .map_err(|_| invalid("tcp port must be 0-65535"))?;
            let host = match host {
                "*" => "0.0.0.0".to_string(),
                other => other.trim_start_matches('[').trim_end_matches(']').to_string(),
            };
            return Ok(Self::Tcp { host, port });
        }

        let path = trimmed.strip_prefix(UNIX_SCHEME).unwrap_or(trimmed);
        if path.is_empty() {
            return Err(invalid("unix endpoint needs a path"));
        }
        if path.contains("://") {
            return Err(invalid("unknown endpoint scheme"));
        }
        Ok(Self::Unix(PathBuf::from(path)))
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        match self {
            Self::Tcp { .. } => "tcp",
            Self::Unix(_) => "unix-domain-socket",
        }
    }

    pub(crate) fn tcp_addr(host: &str, port: u16) -> String {
        if host.contains(':') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(f, "{TCP_SCHEME}{}", Self::tcp_addr(host, *port)),
            Self::Unix(path) => write!(f, "{UNIX_SCHEME}{}", path.display()),
        }
    }
}

impl FromStr for Endpoint {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
