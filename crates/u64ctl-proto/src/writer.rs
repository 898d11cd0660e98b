use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::encode_frame;
use crate::command::{Command, StreamChannel};
use crate::error::{ProtocolError, Result};
use crate::payload;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Encodes and transmits commands over any `Write` stream.
///
/// The protocol is fire-and-forget: every method sends one complete frame
/// and flushes, nothing is ever read back. Payload shaping follows the
/// device's conventions (see [`crate::payload`]).
pub struct CommandWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> CommandWriter<T> {
    /// Create a new command writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Encode and send a raw command frame (blocking).
    pub fn send(&mut self, command: Command, payload: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_frame(command, payload, &mut self.buf)?;
        trace!(?command, payload_len = payload.len(), "sending frame");

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(ProtocolError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(ProtocolError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(ProtocolError::Io(err)),
            }
        }
    }

    /// Load a PRG (2-byte load address header + data) into memory.
    pub fn dma_load(&mut self, prg: &[u8]) -> Result<()> {
        self.send(Command::DmaLoad, prg)
    }

    /// Load a PRG and RUN it.
    pub fn dma_run(&mut self, prg: &[u8]) -> Result<()> {
        self.send(Command::DmaRun, prg)
    }

    /// Load a PRG and JMP to its start address.
    pub fn dma_jump(&mut self, prg: &[u8]) -> Result<()> {
        self.send(Command::DmaJump, prg)
    }

    /// Write bytes directly into C64 memory at `addr`.
    pub fn mem_write(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        let buf = payload::mem_write(addr, data);
        self.send(Command::MemWrite, &buf)
    }

    /// Write one chunk of at most [`crate::command::REU_MAX_SIZE`] bytes
    /// into REU memory at `offset`.
    pub fn reu_write(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        let buf = payload::reu_write(offset, data)?;
        self.send(Command::ReuWrite, &buf)
    }

    /// Write a kernal ROM image to flash.
    pub fn kernal_write(&mut self, data: &[u8]) -> Result<()> {
        let buf = payload::kernal_write(data);
        self.send(Command::KernalWrite, &buf)
    }

    /// Inject raw keystroke bytes (decode macro text with
    /// [`crate::text::decode_text`] first).
    pub fn keyboard_inject(&mut self, keys: &[u8]) -> Result<()> {
        self.send(Command::KeyboardInject, keys)
    }

    /// Reset the machine.
    pub fn reset(&mut self) -> Result<()> {
        self.send(Command::Reset, &[])
    }

    /// Power the machine off.
    pub fn power_off(&mut self) -> Result<()> {
        self.send(Command::PowerOff, &[])
    }

    /// Mount a disk image.
    pub fn mount_image(&mut self, image: &[u8]) -> Result<()> {
        self.send(Command::MountImage, image)
    }

    /// Mount a disk image and run it.
    pub fn run_image(&mut self, image: &[u8]) -> Result<()> {
        self.send(Command::RunImage, image)
    }

    /// Run a cartridge image.
    pub fn run_cartridge(&mut self, crt: &[u8]) -> Result<()> {
        self.send(Command::RunCartridge, crt)
    }

    /// Enable a stream for `duration` ticks (0 = until disabled), optionally
    /// redirected to an ASCII `host:port` address.
    pub fn stream_on(
        &mut self,
        channel: StreamChannel,
        duration: u16,
        addr: Option<&str>,
    ) -> Result<()> {
        let buf = payload::stream_on(duration, addr)?;
        self.send(Command::StreamOn(channel), &buf)
    }

    /// Disable a stream.
    pub fn stream_off(&mut self, channel: StreamChannel) -> Result<()> {
        self.send(Command::StreamOff(channel), &[])
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
