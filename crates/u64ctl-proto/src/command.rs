//! Command ids of the DMA socket protocol.
//!
//! Core commands occupy 0xFF01-0xFF0D. Stream control uses a base id per
//! direction (0xFF20 on, 0xFF30 off) plus the channel index. Ids at 0xFF71
//! and above are developer-only diagnostics; they are kept here for wire
//! compatibility but get no public operations.

use std::fmt;
use std::str::FromStr;

/// Maximum data bytes in a single REU write frame, and the chunk size used
/// for REU uploads (64 KiB minus the 24-bit offset prefix and slack).
pub const REU_MAX_SIZE: usize = 65536 - 4;

pub const CMD_DMA: u16 = 0xFF01;
pub const CMD_DMARUN: u16 = 0xFF02;
pub const CMD_KEYB: u16 = 0xFF03;
pub const CMD_RESET: u16 = 0xFF04;
pub const CMD_WAIT: u16 = 0xFF05;
pub const CMD_DMAWRITE: u16 = 0xFF06;
pub const CMD_REUWRITE: u16 = 0xFF07;
pub const CMD_KERNALWRITE: u16 = 0xFF08;
pub const CMD_DMAJUMP: u16 = 0xFF09;
pub const CMD_MOUNT_IMG: u16 = 0xFF0A;
pub const CMD_RUN_IMG: u16 = 0xFF0B;
pub const CMD_POWEROFF: u16 = 0xFF0C;
pub const CMD_RUN_CRT: u16 = 0xFF0D;

/// Base id for stream-enable; add the channel index.
pub const CMD_STREAM_ON_BASE: u16 = 0xFF20;
/// Base id for stream-disable; add the channel index.
pub const CMD_STREAM_OFF_BASE: u16 = 0xFF30;

// Undocumented diagnostic ids, developer use only.
pub const CMD_LOADSIDCRT: u16 = 0xFF71;
pub const CMD_LOADBOOTCRT: u16 = 0xFF72;
pub const CMD_READFLASH: u16 = 0xFF75;
pub const CMD_DEBUG_REG: u16 = 0xFF76;

/// A real-time data feed the device can push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamChannel {
    Vic,
    Audio,
    Debug,
}

impl StreamChannel {
    /// Channel index added to the stream on/off base ids.
    pub fn index(self) -> u16 {
        match self {
            StreamChannel::Vic => 0,
            StreamChannel::Audio => 1,
            StreamChannel::Debug => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StreamChannel::Vic => "vic",
            StreamChannel::Audio => "audio",
            StreamChannel::Debug => "debug",
        }
    }
}

impl fmt::Display for StreamChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StreamChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vic" => Ok(StreamChannel::Vic),
            "audio" => Ok(StreamChannel::Audio),
            "debug" => Ok(StreamChannel::Debug),
            other => Err(format!(
                "unknown stream channel '{other}' (expected vic, audio or debug)"
            )),
        }
    }
}

/// Width of a frame's length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClass {
    /// 16-bit payload length, 4-byte header.
    Standard,
    /// 24-bit payload length, 5-byte header (image mount/run, cartridge run).
    Long,
}

impl HeaderClass {
    /// Total header size on the wire (command id + length field).
    pub fn header_size(self) -> usize {
        match self {
            HeaderClass::Standard => 4,
            HeaderClass::Long => 5,
        }
    }

    /// Largest payload the length field can represent.
    pub fn max_payload(self) -> usize {
        match self {
            HeaderClass::Standard => 0xFFFF,
            HeaderClass::Long => 0xFF_FFFF,
        }
    }
}

/// One device operation of the DMA socket protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Load a PRG into C64 memory via DMA.
    DmaLoad,
    /// Load a PRG and RUN it.
    DmaRun,
    /// Inject raw keystrokes into the keyboard buffer.
    KeyboardInject,
    /// Reset the machine.
    Reset,
    /// Firmware-side delay.
    Wait,
    /// Write bytes at an explicit C64 address.
    MemWrite,
    /// Write bytes into REU memory.
    ReuWrite,
    /// Write a kernal ROM image to flash.
    KernalWrite,
    /// Load a PRG and JMP to its start address.
    DmaJump,
    /// Mount a disk image.
    MountImage,
    /// Mount a disk image and run it.
    RunImage,
    /// Power the machine off.
    PowerOff,
    /// Run a cartridge image.
    RunCartridge,
    /// Enable a real-time stream.
    StreamOn(StreamChannel),
    /// Disable a real-time stream.
    StreamOff(StreamChannel),
}

impl Command {
    /// Wire id of this command.
    pub fn id(self) -> u16 {
        match self {
            Command::DmaLoad => CMD_DMA,
            Command::DmaRun => CMD_DMARUN,
            Command::KeyboardInject => CMD_KEYB,
            Command::Reset => CMD_RESET,
            Command::Wait => CMD_WAIT,
            Command::MemWrite => CMD_DMAWRITE,
            Command::ReuWrite => CMD_REUWRITE,
            Command::KernalWrite => CMD_KERNALWRITE,
            Command::DmaJump => CMD_DMAJUMP,
            Command::MountImage => CMD_MOUNT_IMG,
            Command::RunImage => CMD_RUN_IMG,
            Command::PowerOff => CMD_POWEROFF,
            Command::RunCartridge => CMD_RUN_CRT,
            Command::StreamOn(ch) => CMD_STREAM_ON_BASE + ch.index(),
            Command::StreamOff(ch) => CMD_STREAM_OFF_BASE + ch.index(),
        }
    }

    /// Look a command up by wire id. Diagnostic ids are not mapped.
    pub fn from_id(id: u16) -> Option<Command> {
        match id {
            CMD_DMA => Some(Command::DmaLoad),
            CMD_DMARUN => Some(Command::DmaRun),
            CMD_KEYB => Some(Command::KeyboardInject),
            CMD_RESET => Some(Command::Reset),
            CMD_WAIT => Some(Command::Wait),
            CMD_DMAWRITE => Some(Command::MemWrite),
            CMD_REUWRITE => Some(Command::ReuWrite),
            CMD_KERNALWRITE => Some(Command::KernalWrite),
            CMD_DMAJUMP => Some(Command::DmaJump),
            CMD_MOUNT_IMG => Some(Command::MountImage),
            CMD_RUN_IMG => Some(Command::RunImage),
            CMD_POWEROFF => Some(Command::PowerOff),
            CMD_RUN_CRT => Some(Command::RunCartridge),
            0xFF20 => Some(Command::StreamOn(StreamChannel::Vic)),
            0xFF21 => Some(Command::StreamOn(StreamChannel::Audio)),
            0xFF22 => Some(Command::StreamOn(StreamChannel::Debug)),
            0xFF30 => Some(Command::StreamOff(StreamChannel::Vic)),
            0xFF31 => Some(Command::StreamOff(StreamChannel::Audio)),
            0xFF32 => Some(Command::StreamOff(StreamChannel::Debug)),
            _ => None,
        }
    }

    /// Length-field width class of this command.
    pub fn header_class(self) -> HeaderClass {
        match self {
            Command::MountImage | Command::RunImage | Command::RunCartridge => HeaderClass::Long,
            _ => HeaderClass::Standard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_ids_match_wire_values() {
        assert_eq!(Command::DmaLoad.id(), 0xFF01);
        assert_eq!(Command::MemWrite.id(), 0xFF06);
        assert_eq!(Command::RunCartridge.id(), 0xFF0D);
    }

    #[test]
    fn stream_ids_offset_by_channel() {
        assert_eq!(Command::StreamOn(StreamChannel::Vic).id(), 0xFF20);
        assert_eq!(Command::StreamOn(StreamChannel::Audio).id(), 0xFF21);
        assert_eq!(Command::StreamOff(StreamChannel::Debug).id(), 0xFF32);
    }

    #[test]
    fn only_image_commands_are_long() {
        for cmd in [
            Command::DmaLoad,
            Command::DmaRun,
            Command::KeyboardInject,
            Command::Reset,
            Command::Wait,
            Command::MemWrite,
            Command::ReuWrite,
            Command::KernalWrite,
            Command::DmaJump,
            Command::PowerOff,
            Command::StreamOn(StreamChannel::Vic),
            Command::StreamOff(StreamChannel::Audio),
        ] {
            assert_eq!(cmd.header_class(), HeaderClass::Standard, "{cmd:?}");
        }
        for cmd in [
            Command::MountImage,
            Command::RunImage,
            Command::RunCartridge,
        ] {
            assert_eq!(cmd.header_class(), HeaderClass::Long, "{cmd:?}");
        }
    }

    #[test]
    fn from_id_round_trips() {
        for id in [
            0xFF01u16, 0xFF02, 0xFF03, 0xFF04, 0xFF05, 0xFF06, 0xFF07, 0xFF08, 0xFF09, 0xFF0A,
            0xFF0B, 0xFF0C, 0xFF0D, 0xFF20, 0xFF21, 0xFF22, 0xFF30, 0xFF31, 0xFF32,
        ] {
            let cmd = Command::from_id(id).expect("id should map to a command");
            assert_eq!(cmd.id(), id);
        }
        assert!(Command::from_id(0xFF71).is_none());
        assert!(Command::from_id(0x0000).is_none());
    }

    #[test]
    fn stream_channel_parses_case_insensitively() {
        assert_eq!("vic".parse::<StreamChannel>().unwrap(), StreamChannel::Vic);
        assert_eq!(
            "AUDIO".parse::<StreamChannel>().unwrap(),
            StreamChannel::Audio
        );
        assert!("sid".parse::<StreamChannel>().is_err());
    }
}
