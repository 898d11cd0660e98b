//! TCP session establishment for the Ultimate64 DMA socket protocol.
//!
//! The device listens on a plain TCP port (64 by default) and the protocol is
//! strictly fire-and-forget: one connection per session, opened once and
//! closed on shutdown. This crate only knows how to open that connection;
//! framing lives in `u64ctl-proto`.

pub mod error;
pub mod tcp;

pub use error::{Result, TransportError};
pub use tcp::{connect, connect_timeout, DEFAULT_PORT};
