//! Blocking request/response connection.
//!
//! One connection carries exactly one exchange. The socket is closed when
//! the [`Connection`] is dropped, whichever way the command ends.
//!
//! # Example
//!
//! ```ignore
//! use devmode_client::protocol::Request;
//! use devmode_client::transport::connect;
//!
//! let mut conn = connect("127.0.0.1:27177".parse()?)?;
//! let response = conn.exchange(&Request::Status)?;
//! ```

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddrV4, TcpStream};

use tracing::{debug, warn};

use crate::error::{DevModeError, Result};
use crate::protocol::{decode_response, Request, Response, RESPONSE_SIZE};

/// Port the Zune application listens on (WP7).
pub const WP7_PORT: u16 = 27077;

/// Port IPtoUSBSvc listens on (WP8).
pub const WP8_PORT: u16 = 27177;

/// Advice shown when nothing listens on `port`.
pub fn connection_hint(port: u16) -> &'static str {
    match port {
        WP7_PORT => "make sure the Zune application is open, and wait a few moments",
        WP8_PORT => "make sure IPtoUSBSvc is running",
        _ => "try either 27177 (WP8) or 27077 (WP7)",
    }
}

/// Open the TCP connection to the companion service.
pub fn connect(addr: SocketAddrV4) -> Result<Connection<TcpStream>> {
    debug!("Connecting to {}", addr);
    match TcpStream::connect(addr) {
        Ok(stream) => Ok(Connection::new(stream)),
        Err(e) if e.kind() == ErrorKind::ConnectionRefused => {
            Err(DevModeError::ConnectionRefused { port: addr.port() })
        }
        Err(e) => Err(DevModeError::Connect(e)),
    }
}

/// A connected stream to the companion service.
pub struct Connection<S> {
    stream: S,
}

impl<S: Read + Write> Connection<S> {
    /// Wrap an already connected stream.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Send one request and read its response.
    ///
    /// Reads at most `RESPONSE_SIZE` bytes. A peer that closes early yields
    /// `MalformedResponse`; a silent peer blocks forever.
    pub fn exchange(&mut self, request: &Request<'_>) -> Result<Response> {
        let frame = request.encode()?;
        debug!(
            "Sending {} frame ({} bytes)",
            request.command_type(),
            frame.len()
        );
        self.stream.write_all(&frame)?;
        self.stream.flush()?;

        let mut buf = Vec::with_capacity(RESPONSE_SIZE);
        (&mut self.stream)
            .take(RESPONSE_SIZE as u64)
            .read_to_end(&mut buf)?;

        let response = decode_response(&buf).inspect_err(|e| {
            warn!("Discarding response {:02x?}: {}", buf, e);
        })?;
        debug!("Received {:?} with code {:#x}", response.kind, response.code);
        Ok(response)
    }

    /// Get a reference to the underlying stream.
    pub fn inner(&self) -> &S {
        &self.stream
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}
