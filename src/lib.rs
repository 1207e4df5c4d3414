//! # devmode-client
//!
//! Diagnostic client for the developer-mode registration protocol spoken by
//! phone companion services (Zune on port 27077, IPtoUSBSvc on port 27177).
//!
//! ## Architecture
//!
//! - **Protocol**: pure codec for the four request frames and the fixed
//!   11-byte response frame
//! - **Transport**: one blocking TCP connection, one exchange
//! - **Client**: runs a verb and turns the response into a [`Report`]
//!
//! ## Example
//!
//! ```
//! use devmode_client::protocol::{decode_response, encode_status_request};
//!
//! assert_eq!(&encode_status_request()[..], &[0x10, 0x01, 0x00, 0x00]);
//!
//! let resp = decode_response(&[0x10, 0x52, 6, 0, 1, 4, 0, 0x0E, 0, 0, 0]).unwrap();
//! assert!(!resp.is_success());
//! assert_eq!(
//!     devmode_client::codes::describe_error(resp.code),
//!     "device is already registered to the internal environment"
//! );
//! ```

pub mod codes;
pub mod config;
pub mod error;
pub mod output;
pub mod protocol;
pub mod transport;

mod client;

pub use client::{run, DevModeClient, Report, Verb};
pub use config::{ClientConfig, DEFAULT_COOKIE};
pub use error::DevModeError;
