//! Client configuration.

use std::net::{Ipv4Addr, SocketAddrV4};

use crate::protocol::Environment;
use crate::transport::WP8_PORT;

/// Cookie presented when none is given on the command line.
pub const DEFAULT_COOKIE: &str = "Cookie: SWMAuth=EmmaWasHere";

/// Where to connect and what to authenticate with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Address of the companion service, loopback by default.
    pub host: Ipv4Addr,
    pub port: u16,
    /// Auth cookie for lock and unlock.
    pub cookie: String,
    /// Target environment for unlock.
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::LOCALHOST,
            port: WP8_PORT,
            cookie: DEFAULT_COOKIE.to_string(),
            environment: Environment::Production,
        }
    }
}

impl ClientConfig {
    /// Default configuration for `port`.
    pub fn new(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    pub fn with_host(mut self, host: Ipv4Addr) -> Self {
        self.host = host;
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = cookie.into();
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.host, self.port)
    }
}
