//! Transport module - the single blocking TCP connection to the companion service.
//!
//! - WP7 devices are reached through the Zune application on port 27077
//! - WP8 devices are reached through IPtoUSBSvc on port 27177

mod connection;

pub use connection::{connect, connection_hint, Connection, WP7_PORT, WP8_PORT};
