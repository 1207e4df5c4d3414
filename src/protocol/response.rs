//! Inbound response frame.
//!
//! The companion service always answers with exactly 11 bytes:
//! ```text
//! ┌────────┬─────────┬────────┬─────┬────────┬──────────┐
//! │ 0x10   │ 51 / 52 │ 6 (LE) │ 1   │ 4 (LE) │ code LE  │
//! │ 1 byte │ 1 byte  │ 2 bytes│ 1 b │ 2 bytes│ 4 bytes  │
//! └────────┴─────────┴────────┴─────┴────────┴──────────┘
//! ```
//!
//! Every fixed-size assumption about responses goes through
//! [`RESPONSE_SIZE`].

use super::fields::{FIELD_PREFIX_SIZE, STATUS_TAG};
use super::wire_format::{CommandType, Header, HEADER_SIZE};
use crate::codes::DeviceError;
use crate::error::{DevModeError, Result};

/// Length of the status code value.
const STATUS_CODE_SIZE: usize = 4;

/// Length field every response header carries.
///
/// One less than the bytes that actually follow the header.
pub const RESPONSE_DECLARED_LENGTH: u16 = 6;

/// Bytes following the header: the status field.
pub const RESPONSE_BODY_SIZE: usize = FIELD_PREFIX_SIZE + STATUS_CODE_SIZE;

/// Size of a response frame in bytes (fixed, exactly 11).
pub const RESPONSE_SIZE: usize = HEADER_SIZE + RESPONSE_BODY_SIZE;

/// Kind of response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// `0x51`: the command ran, `code` is its result.
    Result,
    /// `0x52`: the command failed, `code` is an error code.
    Error,
}

/// Decoded response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub kind: ResponseKind,
    pub code: u32,
}

impl Response {
    /// Check if the device reported success.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.kind == ResponseKind::Result
    }

    /// Split into the result code or the device error.
    pub fn into_result(self) -> std::result::Result<u32, DeviceError> {
        match self.kind {
            ResponseKind::Result => Ok(self.code),
            ResponseKind::Error => Err(DeviceError::new(self.code)),
        }
    }
}

/// Decode a response frame into `(is_success, code)` form.
///
/// # Errors
///
/// Returns `MalformedResponse` if `buf` is not exactly `RESPONSE_SIZE` bytes
/// or any fixed field differs from the expected layout.
///
/// # Example
///
/// ```
/// use devmode_client::protocol::decode_response;
///
/// let resp = decode_response(&[0x10, 0x51, 6, 0, 1, 4, 0, 2, 0, 0, 0]).unwrap();
/// assert!(resp.is_success());
/// assert_eq!(resp.code, 2);
/// ```
pub fn decode_response(buf: &[u8]) -> Result<Response> {
    if buf.len() != RESPONSE_SIZE {
        return Err(malformed(format!(
            "expected {} bytes, got {}",
            RESPONSE_SIZE,
            buf.len()
        )));
    }

    // Length checked above.
    let header = Header::decode(buf).ok_or_else(|| malformed("truncated header".into()))?;
    if !header.has_valid_marker() {
        return Err(malformed(format!("bad marker 0x{:02x}", header.marker)));
    }

    let kind = match header.command_type {
        CommandType::Result => ResponseKind::Result,
        CommandType::Error => ResponseKind::Error,
        other => return Err(malformed(format!("unexpected command type {other}"))),
    };

    if header.payload_length != RESPONSE_DECLARED_LENGTH {
        return Err(malformed(format!(
            "payload length {} (expected {})",
            header.payload_length, RESPONSE_DECLARED_LENGTH
        )));
    }

    let payload = &buf[HEADER_SIZE..];
    if payload[0] != STATUS_TAG {
        return Err(malformed(format!("status tag {}", payload[0])));
    }
    let status_length = u16::from_le_bytes([payload[1], payload[2]]);
    if status_length as usize != STATUS_CODE_SIZE {
        return Err(malformed(format!("status length {status_length}")));
    }

    let code = u32::from_le_bytes([payload[3], payload[4], payload[5], payload[6]]);
    Ok(Response { kind, code })
}

fn malformed(detail: String) -> DevModeError {
    DevModeError::MalformedResponse(detail)
}

/// Encode a response frame, as the companion service would send it.
pub fn encode_response(response: &Response) -> [u8; RESPONSE_SIZE] {
    let command_type = match response.kind {
        ResponseKind::Result => CommandType::Result,
        ResponseKind::Error => CommandType::Error,
    };
    let mut buf = [0u8; RESPONSE_SIZE];
    Header::new(command_type, RESPONSE_DECLARED_LENGTH).encode_into(&mut buf);
    buf[4] = STATUS_TAG;
    buf[5..7].copy_from_slice(&(STATUS_CODE_SIZE as u16).to_le_bytes());
    buf[7..11].copy_from_slice(&response.code.to_le_bytes());
    buf
}
