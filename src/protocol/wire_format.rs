//! Wire format encoding and decoding.
//!
//! Every frame starts with a 4-byte header:
//! ```text
//! ┌────────┬─────────┬────────────┐
//! │ Marker │ Command │ Length     │
//! │ 1 byte │ 1 byte  │ uint16 LE  │
//! └────────┴─────────┴────────────┘
//! ```
//!
//! The length counts the payload bytes that follow the header.
//! All multi-byte integers are Little Endian.

use std::fmt;

/// Header size in bytes (fixed, exactly 4).
pub const HEADER_SIZE: usize = 4;

/// First byte of every frame, in both directions.
pub const FRAME_MARKER: u8 = 0x10;

/// Command byte of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// Query registration status (request).
    GetStatus,
    /// Disable developer mode (request).
    Lock,
    /// Enable developer mode (request).
    Unlock,
    /// Move the device to the internal environment (request).
    SwitchToInternal,
    /// Successful reply carrying a result code.
    Result,
    /// Failed reply carrying an error code.
    Error,
    /// Any byte the protocol does not define.
    Unknown(u8),
}

impl CommandType {
    /// Wire value of this command.
    pub fn as_u8(self) -> u8 {
        match self {
            CommandType::GetStatus => 0x01,
            CommandType::Lock => 0x02,
            CommandType::Unlock => 0x03,
            CommandType::SwitchToInternal => 0x04,
            CommandType::Result => 0x51,
            CommandType::Error => 0x52,
            CommandType::Unknown(b) => b,
        }
    }
}

impl From<u8> for CommandType {
    fn from(b: u8) -> Self {
        match b {
            0x01 => CommandType::GetStatus,
            0x02 => CommandType::Lock,
            0x03 => CommandType::Unlock,
            0x04 => CommandType::SwitchToInternal,
            0x51 => CommandType::Result,
            0x52 => CommandType::Error,
            other => CommandType::Unknown(other),
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandType::GetStatus => f.write_str("GetStatus"),
            CommandType::Lock => f.write_str("Lock"),
            CommandType::Unlock => f.write_str("Unlock"),
            CommandType::SwitchToInternal => f.write_str("SwitchToInt"),
            CommandType::Result => f.write_str("ResultResponse"),
            CommandType::Error => f.write_str("ErrorResponse"),
            CommandType::Unknown(b) => write!(f, "Unknown(0x{b:02x})"),
        }
    }
}

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Marker byte, `FRAME_MARKER` on every well-formed frame.
    pub marker: u8,
    /// Command carried by the frame.
    pub command_type: CommandType,
    /// Payload length in bytes.
    pub payload_length: u16,
}

impl Header {
    /// Create a new header with the standard marker.
    pub fn new(command_type: CommandType, payload_length: u16) -> Self {
        Self {
            marker: FRAME_MARKER,
            command_type,
            payload_length,
        }
    }

    /// Encode header to bytes (Little Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use devmode_client::protocol::{CommandType, Header};
    ///
    /// let header = Header::new(CommandType::Lock, 0x0104);
    /// assert_eq!(header.encode(), [0x10, 0x02, 0x04, 0x01]);
    /// ```
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if buffer is smaller than `HEADER_SIZE` (4 bytes).
    pub fn encode_into(&self, buf: &mut [u8]) {
        buf[0] = self.marker;
        buf[1] = self.command_type.as_u8();
        buf[2..4].copy_from_slice(&self.payload_length.to_le_bytes());
    }

    /// Decode header from bytes (Little Endian).
    ///
    /// Returns `None` if buffer is too short. The marker is not checked here.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            marker: buf[0],
            command_type: CommandType::from(buf[1]),
            payload_length: u16::from_le_bytes([buf[2], buf[3]]),
        })
    }

    /// Check the marker byte.
    #[inline]
    pub fn has_valid_marker(&self) -> bool {
        self.marker == FRAME_MARKER
    }
}
