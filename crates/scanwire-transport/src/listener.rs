use std::net::{SocketAddr, TcpListener, TcpStream};

use tracing::{debug, info};

use crate::endpoint::Endpoint;
use crate::error::{Result, TransportError};
use crate::stream::Stream;

#[cfg(unix)]
use crate::unix::UnixSocketListener;

/// A bound listener for any supported [`Endpoint`].
pub enum Listener {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix(UnixSocketListener),
}

impl Listener {
    /// Bind and listen on `endpoint`.
    pub fn bind(endpoint: &Endpoint) -> Result<Self> {
        match endpoint {
            Endpoint::Tcp { host, port } => {
                let addr = Endpoint::tcp_addr(host, *port);
                let listener = TcpListener::bind(&addr).map_err(|source| TransportError::Bind {
                    endpoint: endpoint.to_string(),
                    source,
                })?;
                info!(addr = ?listener.local_addr().ok(), "listening on tcp");
                Ok(Self::Tcp(listener))
            }
            #[cfg(unix)]
            Endpoint::Unix(path) => Ok(Self::Unix(UnixSocketListener::bind(path)?)),
            #[cfg(not(unix))]
            Endpoint::Unix(_) => Err(TransportError::Unsupported(endpoint.to_string())),
        }
    }

    /// Accept an incoming connection (blocking).
    pub fn accept(&self) -> Result<Stream> {
        match self {
            Self::Tcp(listener) => {
                let (stream, addr) = listener.accept().map_err(TransportError::Accept)?;
                configure_tcp(&stream);
                debug!(%addr, "accepted tcp connection");
                Ok(Stream::from_tcp(stream))
            }
            #[cfg(unix)]
            Self::Unix(listener) => listener.accept(),
        }
    }

    /// The endpoint actually bound, with the resolved port for `tcp://host:0`.
    pub fn local_endpoint(&self) -> Result<Endpoint> {
        match self {
            Self::Tcp(listener) => {
                let addr: SocketAddr = listener.local_addr()?;
                Ok(Endpoint::Tcp {
                    host: addr.ip().to_string(),
                    port: addr.port(),
                })
            }
            #[cfg(unix)]
            Self::Unix(listener) => Ok(Endpoint::Unix(listener.path().to_path_buf())),
        }
    }
}

/// Connect to a listening peer (blocking).
pub fn connect(endpoint: &Endpoint) -> Result<Stream> {
    match endpoint {
        Endpoint::Tcp { host, port } => {
            let addr = Endpoint::tcp_addr(host, *port);
            let stream = TcpStream::connect(&addr).map_err(|source| TransportError::Connect {
                endpoint: endpoint.to_string(),
                source,
            })?;
            configure_tcp(&stream);
            debug!(%addr, "connected over tcp");
            Ok(Stream::from_tcp(stream))
        }
        #[cfg(unix)]
        Endpoint::Unix(path) => UnixSocketListener::connect(path),
        #[cfg(not(unix))]
        Endpoint::Unix(_) => Err(TransportError::Unsupported(endpoint.to_string())),
    }
}

fn configure_tcp(stream: &TcpStream) {
    if let Err(err) = stream.set_nodelay(true) {
        debug!(error = %err, "failed to set TCP_NODELAY");
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    #[test]
    fn tcp_bind_accept_connect() {
        let listener = Listener::bind(&Endpoint::parse("tcp://127.0.0.1:0").unwrap()).unwrap();
        let endpoint = listener.local_endpoint().unwrap();
        assert!(matches!(&endpoint, Endpoint::Tcp { port, .. } if *port != 0));

        let client = std::thread::spawn(move || {
            let mut stream = connect(&endpoint).unwrap();
            stream.write_all(b"tread").unwrap();
        });

        let mut server = listener.accept().unwrap();
        let mut buf = [0u8; 5];
        server.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"tread");
        assert_eq!(server.transport_name(), "tcp");

        client.join().unwrap();
    }

    #[test]
    fn tcp_connect_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = connect(&Endpoint::Tcp {
            host: "127.0.0.1".into(),
            port,
        })
        .unwrap_err();
        assert!(matches!(err, TransportError::Connect { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn unix_endpoint_roundtrip() {
        let dir = std::env::temp_dir().join(format!("scanwire-listener-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let endpoint = Endpoint::Unix(dir.join("l.sock"));

        let listener = Listener::bind(&endpoint).unwrap();
        assert_eq!(listener.local_endpoint().unwrap(), endpoint);

        let client_endpoint = endpoint.clone();
        let client = std::thread::spawn(move || {
            let mut stream = connect(&client_endpoint).unwrap();
            stream.write_all(b"ok").unwrap();
        });

        let mut server = listener.accept().unwrap();
        let mut buf = [0u8; 2];
        server.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ok");

        client.join().unwrap();
        drop(listener);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
