use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::command::{Command, HeaderClass};
use crate::error::{ProtocolError, Result};

/// A complete protocol message.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The device operation this frame carries.
    pub command: Command,
    /// The raw payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(command: Command, payload: impl Into<Bytes>) -> Self {
        Self {
            command,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        self.command.header_class().header_size() + self.payload.len()
    }
}

/// Encode a command into the wire format.
///
/// Wire format (standard commands):
/// ```text
/// ┌───────────────┬───────────────┬──────────────────┐
/// │ Command (2B)  │ Length (2B)   │ Payload          │
/// │ LE, 0xFF01..  │ LE            │ (Length bytes)   │
/// └───────────────┴───────────────┴──────────────────┘
/// ```
///
/// The image mount/run and cartridge commands use a 3-byte length instead
/// (the low 24 bits of the payload length, little-endian). No terminator,
/// no checksum.
pub fn encode_frame(command: Command, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let class = command.header_class();
    if payload.len() > class.max_payload() {
        return Err(ProtocolError::PayloadTooLarge {
            size: payload.len(),
            max: class.max_payload(),
        });
    }
    dst.reserve(class.header_size() + payload.len());
    dst.put_u16_le(command.id());
    match class {
        HeaderClass::Standard => dst.put_u16_le(payload.len() as u16),
        HeaderClass::Long => dst.put_slice(&(payload.len() as u32).to_le_bytes()[..3]),
    }
    dst.put_slice(payload);
    Ok(())
}

/// Decode a frame from a buffer.
///
/// The header width is not self-delimiting on its own; it is recovered by
/// mapping the leading command id back through [`Command::from_id`]. Returns
/// `Ok(None)` if the buffer doesn't contain a complete frame yet. On
/// success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    if src.len() < 2 {
        return Ok(None); // Need more data
    }

    let id = u16::from_le_bytes(src[0..2].try_into().expect("slice is 2 bytes"));
    let command = Command::from_id(id).ok_or(ProtocolError::UnknownCommand { id })?;
    let class = command.header_class();
    let header_size = class.header_size();

    if src.len() < header_size {
        return Ok(None);
    }

    let payload_len = match class {
        HeaderClass::Standard => {
            u16::from_le_bytes(src[2..4].try_into().expect("slice is 2 bytes")) as usize
        }
        HeaderClass::Long => {
            let mut len = [0u8; 4];
            len[..3].copy_from_slice(&src[2..5]);
            u32::from_le_bytes(len) as usize
        }
    };

    let total = header_size + payload_len;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(header_size);
    let payload = src.split_to(payload_len).freeze();

    Ok(Some(Frame { command, payload }))
}
