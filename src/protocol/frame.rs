//! Frame struct with typed accessors.
//!
//! Represents a complete protocol frame with header and payload.
//! The header's length always equals the payload length.
//!
//! # Example
//!
//! ```
//! use devmode_client::protocol::{CommandType, Frame};
//! use bytes::Bytes;
//!
//! let frame = Frame::new(CommandType::Lock, Bytes::from_static(b"hello")).unwrap();
//!
//! assert_eq!(frame.command_type(), CommandType::Lock);
//! assert_eq!(frame.payload(), b"hello");
//! assert_eq!(frame.header.payload_length, 5);
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::wire_format::{CommandType, Header, HEADER_SIZE};
use crate::error::{DevModeError, Result};

/// A complete protocol frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Header, with `payload_length` matching `payload`.
    pub header: Header,
    /// Payload bytes.
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame, deriving the header length from the payload.
    pub fn new(command_type: CommandType, payload: Bytes) -> Result<Self> {
        let payload_length = u16::try_from(payload.len())
            .map_err(|_| DevModeError::PayloadTooLarge(payload.len()))?;
        Ok(Self {
            header: Header::new(command_type, payload_length),
            payload,
        })
    }

    /// Create a frame without a payload.
    pub fn empty(command_type: CommandType) -> Self {
        Self {
            header: Header::new(command_type, 0),
            payload: Bytes::new(),
        }
    }

    /// Parse one complete frame occupying all of `buf`.
    ///
    /// Returns `None` if the marker is wrong or the length field does not
    /// match the number of bytes after the header.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let header = Header::decode(buf)?;
        if !header.has_valid_marker() || buf.len() - HEADER_SIZE != header.payload_length as usize {
            return None;
        }
        Some(Self {
            header,
            payload: Bytes::copy_from_slice(&buf[HEADER_SIZE..]),
        })
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload length.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Get the command type.
    #[inline]
    pub fn command_type(&self) -> CommandType {
        self.header.command_type
    }

    /// Total size on the wire.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Encode header and payload into one contiguous buffer.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_slice(&self.header.encode());
        buf.put_slice(&self.payload);
        buf.freeze()
    }
}
