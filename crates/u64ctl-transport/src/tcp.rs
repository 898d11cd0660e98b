use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};

/// Default control port of the Ultimate64 DMA socket service.
pub const DEFAULT_PORT: u16 = 64;

/// Connect to the device control port (blocking).
///
/// Resolves `host` and tries each address in turn. `TCP_NODELAY` is enabled
/// on the resulting stream since commands are small and latency-sensitive.
pub fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let addrs = resolve(host, port)?;

    let mut last_err = None;
    for addr in &addrs {
        debug!(%addr, "connecting");
        match TcpStream::connect(addr) {
            Ok(stream) => return finish(stream, *addr),
            Err(source) => {
                last_err = Some(TransportError::Connect {
                    addr: *addr,
                    source,
                });
            }
        }
    }

    Err(last_err.unwrap_or(TransportError::NoAddress {
        host: host.to_string(),
    }))
}

/// Connect with a per-address timeout (blocking).
pub fn connect_timeout(host: &str, port: u16, timeout: Duration) -> Result<TcpStream> {
    let addrs = resolve(host, port)?;

    let mut last_err = None;
    for addr in &addrs {
        debug!(%addr, ?timeout, "connecting");
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return finish(stream, *addr),
            Err(source) => {
                last_err = Some(TransportError::Connect {
                    addr: *addr,
                    source,
                });
            }
        }
    }

    Err(last_err.unwrap_or(TransportError::NoAddress {
        host: host.to_string(),
    }))
}

fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| TransportError::Resolve {
            host: host.to_string(),
            source,
        })?
        .collect();

    if addrs.is_empty() {
        return Err(TransportError::NoAddress {
            host: host.to_string(),
        });
    }

    Ok(addrs)
}

fn finish(stream: TcpStream, addr: SocketAddr) -> Result<TcpStream> {
    stream.set_nodelay(true)?;
    info!(%addr, "connected to device");
    Ok(stream)
}
