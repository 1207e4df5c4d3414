//! Protocol module - wire format, payload fields, and request/response frames.
//!
//! This module implements the binary protocol spoken with the companion service:
//! - 4-byte header encoding/decoding
//! - Tag-length-value payload fields (auth token, environment selector)
//! - The four request frames and the fixed 11-byte response frame

mod fields;
mod frame;
mod request;
mod response;
mod wire_format;

pub use fields::{
    AuthToken, Environment, AUTH_TOKEN_TAG, ENVIRONMENT_FIELD_SIZE, ENVIRONMENT_TAG,
    FIELD_PREFIX_SIZE, STATUS_TAG,
};
pub use frame::Frame;
pub use request::{
    encode_lock_request, encode_status_request, encode_switch_to_internal_request,
    encode_unlock_request, Request,
};
pub use response::{
    decode_response, encode_response, Response, ResponseKind, RESPONSE_BODY_SIZE,
    RESPONSE_DECLARED_LENGTH, RESPONSE_SIZE,
};
pub use wire_format::{CommandType, Header, FRAME_MARKER, HEADER_SIZE};
