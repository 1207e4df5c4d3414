//! Outbound command frames.
//!
//! | Command          | Type | Payload                              |
//! |------------------|------|--------------------------------------|
//! | GetStatus        | 0x01 | none                                 |
//! | Lock             | 0x02 | auth token                           |
//! | Unlock           | 0x03 | auth token, environment selector     |
//! | SwitchToInternal | 0x04 | none                                 |

use bytes::{Bytes, BytesMut};

use super::fields::{AuthToken, Environment, ENVIRONMENT_FIELD_SIZE};
use super::frame::Frame;
use super::wire_format::CommandType;
use crate::error::Result;

/// A request the client can send to the companion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request<'a> {
    Status,
    Lock { cookie: &'a str },
    Unlock { cookie: &'a str, environment: Environment },
    SwitchToInternal,
}

impl Request<'_> {
    /// Command byte of this request.
    pub fn command_type(&self) -> CommandType {
        match self {
            Request::Status => CommandType::GetStatus,
            Request::Lock { .. } => CommandType::Lock,
            Request::Unlock { .. } => CommandType::Unlock,
            Request::SwitchToInternal => CommandType::SwitchToInternal,
        }
    }

    /// Build the frame for this request.
    pub fn to_frame(&self) -> Result<Frame> {
        match self {
            Request::Status | Request::SwitchToInternal => Ok(Frame::empty(self.command_type())),
            Request::Lock { cookie } => {
                let token = AuthToken::new(cookie)?;
                let mut payload = BytesMut::with_capacity(token.encoded_len());
                token.encode_into(&mut payload);
                Frame::new(self.command_type(), payload.freeze())
            }
            Request::Unlock {
                cookie,
                environment,
            } => {
                let token = AuthToken::new(cookie)?;
                let mut payload =
                    BytesMut::with_capacity(token.encoded_len() + ENVIRONMENT_FIELD_SIZE);
                token.encode_into(&mut payload);
                environment.encode_into(&mut payload);
                Frame::new(self.command_type(), payload.freeze())
            }
        }
    }

    /// Encode this request to wire bytes.
    pub fn encode(&self) -> Result<Bytes> {
        self.to_frame().map(|frame| frame.encode())
    }
}

/// Encode a status query: `[0x10, 0x01, 0x00, 0x00]`.
pub fn encode_status_request() -> Bytes {
    Frame::empty(CommandType::GetStatus).encode()
}

/// Encode a lock request carrying `cookie`.
pub fn encode_lock_request(cookie: &str) -> Result<Bytes> {
    Request::Lock { cookie }.encode()
}

/// Encode an unlock request carrying `cookie` and the target environment.
pub fn encode_unlock_request(cookie: &str, use_internal: bool) -> Result<Bytes> {
    Request::Unlock {
        cookie,
        environment: Environment::from_use_internal(use_internal),
    }
    .encode()
}

/// Encode a switch-to-internal request: `[0x10, 0x04, 0x00, 0x00]`.
pub fn encode_switch_to_internal_request() -> Bytes {
    Frame::empty(CommandType::SwitchToInternal).encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DevModeError;
    use crate::protocol::HEADER_SIZE;
    use proptest::prelude::*;

    fn header_length(bytes: &[u8]) -> usize {
        u16::from_le_bytes([bytes[2], bytes[3]]) as usize
    }

    #[test]
    fn test_status_request_bytes() {
        assert_eq!(&encode_status_request()[..], &[0x10, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_switch_to_internal_request_bytes() {
        assert_eq!(
            &encode_switch_to_internal_request()[..],
            &[0x10, 0x04, 0x00, 0x00]
        );
    }

    #[test]
    fn test_lock_request_layout() {
        let bytes = encode_lock_request("hi").unwrap();
        assert_eq!(&bytes[..], &[0x10, 0x02, 5, 0, 1, 2, 0, b'h', b'i']);
    }

    #[test]
    fn test_unlock_request_production() {
        let cookie = "Cookie: SWMAuth=EmmaWasHere";
        let bytes = encode_unlock_request(cookie, false).unwrap();
        let expected = 3 + cookie.len() + 5;

        assert_eq!(bytes[1], 0x03);
        assert_eq!(header_length(&bytes), expected);
        assert_eq!(bytes.len() - HEADER_SIZE, expected);

        let selector = &bytes[bytes.len() - 5..];
        assert_eq!(selector, &[2, 2, 0, 1, 0]);
    }

    #[test]
    fn test_unlock_request_internal() {
        let bytes = encode_unlock_request("ключ", true).unwrap();
        assert_eq!(header_length(&bytes), 3 + "ключ".len() + 5);

        let n = bytes.len();
        assert_eq!(u16::from_le_bytes([bytes[n - 2], bytes[n - 1]]), 0);
    }

    #[test]
    fn test_unlock_request_empty_cookie() {
        let bytes = encode_unlock_request("", false).unwrap();
        assert_eq!(
            &bytes[..],
            &[0x10, 0x03, 8, 0, 1, 0, 0, 2, 2, 0, 1, 0]
        );
    }

    #[test]
    fn test_cookie_too_long_rejected() {
        let cookie = "a".repeat(70_000);
        assert!(matches!(
            encode_lock_request(&cookie),
            Err(DevModeError::CookieTooLong(70_000))
        ));
        assert!(matches!(
            encode_unlock_request(&cookie, true),
            Err(DevModeError::CookieTooLong(70_000))
        ));
    }

    #[test]
    fn test_longest_cookie_overflows_unlock_frame() {
        // Fits the token, not the frame once the selector is added.
        let cookie = "a".repeat(u16::MAX as usize - 3);
        assert!(encode_lock_request(&cookie).is_ok());
        assert!(matches!(
            encode_unlock_request(&cookie, false),
            Err(DevModeError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_request_command_types() {
        assert_eq!(Request::Status.command_type(), CommandType::GetStatus);
        assert_eq!(
            Request::Lock { cookie: "" }.command_type(),
            CommandType::Lock
        );
        assert_eq!(
            Request::Unlock {
                cookie: "",
                environment: Environment::Production
            }
            .command_type(),
            CommandType::Unlock
        );
        assert_eq!(
            Request::SwitchToInternal.command_type(),
            CommandType::SwitchToInternal
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Lock payload is the auth token alone: 3 + cookie bytes.
        #[test]
        fn prop_lock_length_tracks_cookie_bytes(cookie in any::<String>()) {
            let bytes = encode_lock_request(&cookie).unwrap();
            let expected = 3 + cookie.len();

            prop_assert_eq!(bytes[1], 0x02);
            prop_assert_eq!(header_length(&bytes), expected);
            prop_assert_eq!(bytes.len() - HEADER_SIZE, expected);
            prop_assert_eq!(&bytes[HEADER_SIZE + 3..], cookie.as_bytes());
        }

        /// Unlock payload adds the 5-byte selector after the token.
        #[test]
        fn prop_unlock_length_and_selector(cookie in any::<String>(), use_internal in any::<bool>()) {
            let bytes = encode_unlock_request(&cookie, use_internal).unwrap();
            let expected = 3 + cookie.len() + 5;

            prop_assert_eq!(bytes[1], 0x03);
            prop_assert_eq!(header_length(&bytes), expected);
            prop_assert_eq!(bytes.len() - HEADER_SIZE, expected);

            let n = bytes.len();
            let selector = u16::from_le_bytes([bytes[n - 2], bytes[n - 1]]);
            prop_assert_eq!(selector, if use_internal { 0 } else { 1 });
        }
    }
}
