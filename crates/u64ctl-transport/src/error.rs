use std::net::SocketAddr;

/// Errors that can occur while establishing a device session.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Hostname resolution failed.
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        source: std::io::Error,
    },

    /// Hostname resolved, but to no usable address.
    #[error("{host} resolved to no addresses")]
    NoAddress { host: String },

    /// Failed to connect to the resolved address.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// An I/O error occurred on the established stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
