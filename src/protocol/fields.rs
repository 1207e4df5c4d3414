//! Tagged payload fragments.
//!
//! Request payloads are a sequence of tag-length-value fields:
//! ```text
//! ┌────────┬───────────┬─────────────┐
//! │ Tag    │ Length    │ Value       │
//! │ 1 byte │ uint16 LE │ Length bytes│
//! └────────┴───────────┴─────────────┘
//! ```

use bytes::BufMut;

use crate::error::{DevModeError, Result};

/// Tag of the authentication cookie field.
pub const AUTH_TOKEN_TAG: u8 = 1;

/// Tag of the environment selector field.
pub const ENVIRONMENT_TAG: u8 = 2;

/// Tag of the status code field in responses.
pub const STATUS_TAG: u8 = 1;

/// Tag byte plus 16-bit length.
pub const FIELD_PREFIX_SIZE: usize = 3;

/// Encoded size of an environment selector.
pub const ENVIRONMENT_FIELD_SIZE: usize = FIELD_PREFIX_SIZE + 2;

/// Authentication cookie, sent as UTF-8 with an explicit byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthToken<'a> {
    cookie: &'a str,
}

impl<'a> AuthToken<'a> {
    /// Wrap a cookie, rejecting ones the length prefix cannot describe.
    pub fn new(cookie: &'a str) -> Result<Self> {
        if cookie.len() > u16::MAX as usize {
            return Err(DevModeError::CookieTooLong(cookie.len()));
        }
        Ok(Self { cookie })
    }

    /// Size of the field on the wire.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        FIELD_PREFIX_SIZE + self.cookie.len()
    }

    /// Append the field to `buf`.
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(AUTH_TOKEN_TAG);
        // Checked in `new`.
        buf.put_u16_le(self.cookie.len() as u16);
        buf.put_slice(self.cookie.as_bytes());
    }
}

/// Backend deployment the device registers against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Internal,
}

impl Environment {
    /// Selector value on the wire.
    pub fn selector_value(self) -> u16 {
        match self {
            Environment::Production => 1,
            Environment::Internal => 0,
        }
    }

    /// Environment for the `use_internal` flag of an unlock request.
    pub fn from_use_internal(use_internal: bool) -> Self {
        if use_internal {
            Environment::Internal
        } else {
            Environment::Production
        }
    }

    /// Append the environment selector field to `buf`.
    pub fn encode_into<B: BufMut>(self, buf: &mut B) {
        buf.put_u8(ENVIRONMENT_TAG);
        buf.put_u16_le(2);
        buf.put_u16_le(self.selector_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_auth_token_layout() {
        let token = AuthToken::new("abc").unwrap();
        let mut buf = BytesMut::new();
        token.encode_into(&mut buf);

        assert_eq!(&buf[..], &[1, 3, 0, b'a', b'b', b'c']);
        assert_eq!(token.encoded_len(), buf.len());
    }

    #[test]
    fn test_auth_token_counts_utf8_bytes() {
        // 2 chars, 6 bytes
        let token = AuthToken::new("é😀").unwrap();
        assert_eq!(token.encoded_len(), FIELD_PREFIX_SIZE + 6);

        let mut buf = BytesMut::new();
        token.encode_into(&mut buf);
        assert_eq!(u16::from_le_bytes([buf[1], buf[2]]), 6);
    }

    #[test]
    fn test_auth_token_empty() {
        let token = AuthToken::new("").unwrap();
        let mut buf = BytesMut::new();
        token.encode_into(&mut buf);
        assert_eq!(&buf[..], &[1, 0, 0]);
    }

    #[test]
    fn test_auth_token_too_long() {
        let cookie = "x".repeat(u16::MAX as usize + 1);
        let err = AuthToken::new(&cookie).unwrap_err();
        assert!(matches!(err, DevModeError::CookieTooLong(65536)));
    }

    #[test]
    fn test_auth_token_max_length() {
        let cookie = "x".repeat(u16::MAX as usize);
        assert!(AuthToken::new(&cookie).is_ok());
    }

    #[test]
    fn test_environment_selector_layout() {
        let mut buf = BytesMut::new();
        Environment::Production.encode_into(&mut buf);
        Environment::Internal.encode_into(&mut buf);

        assert_eq!(&buf[..ENVIRONMENT_FIELD_SIZE], &[2, 2, 0, 1, 0]);
        assert_eq!(&buf[ENVIRONMENT_FIELD_SIZE..], &[2, 2, 0, 0, 0]);
    }

    #[test]
    fn test_environment_from_use_internal() {
        assert_eq!(Environment::from_use_internal(true), Environment::Internal);
        assert_eq!(
            Environment::from_use_internal(false),
            Environment::Production
        );
        assert_eq!(Environment::default(), Environment::Production);
    }
}
