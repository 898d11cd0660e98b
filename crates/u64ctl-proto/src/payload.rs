//! Command-specific payload shaping.
//!
//! These helpers only build payload bytes; framing is [`crate::codec`]'s job
//! and transmission is the caller's.

use bytes::BufMut;

use crate::command::REU_MAX_SIZE;
use crate::error::{ProtocolError, Result};

/// Payload for a DMA memory write: 2-byte LE target address + data.
pub fn mem_write(addr: u16, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + data.len());
    buf.put_u16_le(addr);
    buf.put_slice(data);
    buf
}

/// Payload for a REU write: low 3 bytes of the LE target offset + data.
///
/// A single REU frame carries at most [`REU_MAX_SIZE`] data bytes; larger
/// transfers must be split with [`crate::chunk::chunk_iter`] first.
pub fn reu_write(offset: u32, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > REU_MAX_SIZE {
        return Err(ProtocolError::PayloadTooLarge {
            size: data.len(),
            max: REU_MAX_SIZE,
        });
    }
    let mut buf = Vec::with_capacity(3 + data.len());
    buf.put_slice(&offset.to_le_bytes()[..3]);
    buf.put_slice(data);
    Ok(buf)
}

/// Payload for a kernal flash write.
///
/// The firmware skips the first 2 bytes of the payload (PRG header
/// leftover?), so a zero pad is prepended. Preserved as-is; do not "fix"
/// without checking against the device.
pub fn kernal_write(data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + data.len());
    buf.put_slice(&[0, 0]);
    buf.put_slice(data);
    buf
}

/// Payload for stream-enable: 2-byte LE duration + optional ASCII
/// destination address.
///
/// A duration of 0 streams until explicitly disabled.
pub fn stream_on(duration: u16, addr: Option<&str>) -> Result<Vec<u8>> {
    let addr = addr.unwrap_or("");
    if !addr.is_ascii() {
        return Err(ProtocolError::InvalidArgument(format!(
            "stream address must be ASCII: '{addr}'"
        )));
    }
    let mut buf = Vec::with_capacity(2 + addr.len());
    buf.put_u16_le(duration);
    buf.put_slice(addr.as_bytes());
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_write_prefixes_address() {
        assert_eq!(mem_write(0x0400, b"\xAB\xCD"), b"\x00\x04\xAB\xCD");
    }

    #[test]
    fn reu_write_prefixes_24bit_offset() {
        let buf = reu_write(0x123456, b"\x01").unwrap();
        assert_eq!(buf, b"\x56\x34\x12\x01");
    }

    #[test]
    fn reu_write_rejects_oversized_chunk() {
        let data = vec![0u8; REU_MAX_SIZE + 1];
        let err = reu_write(0, &data).unwrap_err();
        assert!(matches!(err, ProtocolError::PayloadTooLarge { .. }));
    }

    #[test]
    fn reu_write_accepts_max_chunk() {
        let data = vec![0u8; REU_MAX_SIZE];
        assert!(reu_write(0xFF_FFFF, &data).is_ok());
    }

    #[test]
    fn kernal_write_pads_two_bytes() {
        assert_eq!(kernal_write(b"\xA9\x00"), b"\x00\x00\xA9\x00");
    }

    #[test]
    fn stream_on_duration_only() {
        assert_eq!(stream_on(0x1234, None).unwrap(), b"\x34\x12");
    }

    #[test]
    fn stream_on_with_address() {
        assert_eq!(
            stream_on(0, Some("10.0.0.2:11000")).unwrap(),
            b"\x00\x0010.0.0.2:11000"
        );
    }

    #[test]
    fn stream_on_rejects_non_ascii_address() {
        let err = stream_on(0, Some("hôte")).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidArgument(_)));
    }
}
