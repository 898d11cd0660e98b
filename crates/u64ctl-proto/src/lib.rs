//! Frame encoding for the Ultimate64/1541U DMA socket protocol.
//!
//! This is the core value-add layer of u64ctl. Every command is framed with:
//! - A 2-byte little-endian command id (0xFF01..)
//! - A little-endian payload length, 2 bytes for most commands or 3 bytes
//!   for the image mount/run commands
//! - The raw payload
//!
//! There is no magic, no checksum and no response frames: the protocol is
//! fire-and-forget over a single TCP connection. On top of the codec this
//! crate provides the chunk iterator used for large REU uploads and the
//! `{name}` control-macro decoder for keyboard injection.

pub mod chunk;
pub mod codec;
pub mod command;
pub mod error;
pub mod payload;
pub mod text;
pub mod writer;

pub use chunk::{chunk_iter, ChunkIter};
pub use codec::{decode_frame, encode_frame, Frame};
pub use command::{Command, HeaderClass, StreamChannel, REU_MAX_SIZE};
pub use error::{ProtocolError, Result};
pub use text::{decode_text, decode_text_with, MacroPolicy};
pub use writer::CommandWriter;
