//! Command runner.
//!
//! The [`DevModeClient`] performs one exchange per verb and turns the
//! device's answer into a [`Report`]. Error frames from the device are
//! reported, not returned as errors.
//!
//! # Example
//!
//! ```ignore
//! use devmode_client::{ClientConfig, Verb};
//!
//! let config = ClientConfig::new(27177);
//! let report = devmode_client::run(Verb::Status, &config)?;
//! println!("{}", report.message);
//! ```

use std::fmt;
use std::io::{Read, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::codes::{describe_error, DeviceStatus};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::protocol::{Environment, Request, Response};
use crate::transport::{connect, Connection};

/// Operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Query registration status
    Status,
    /// Disable developer mode
    Lock,
    /// Enable developer mode
    Unlock,
    /// Switch the device to the internal environment
    #[value(name = "switchint")]
    #[serde(rename = "switchint")]
    SwitchInt,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Status => f.write_str("status"),
            Verb::Lock => f.write_str("lock"),
            Verb::Unlock => f.write_str("unlock"),
            Verb::SwitchInt => f.write_str("switchint"),
        }
    }
}

/// Outcome of one verb, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub verb: Verb,
    pub success: bool,
    pub code: u32,
    /// Registration state, for a successful status query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
    pub message: String,
}

impl Report {
    fn from_response(verb: Verb, response: Response) -> Self {
        let code = response.code;
        let mut status = None;
        let message = match response.into_result() {
            Ok(code) => match verb {
                Verb::Status => {
                    let s = DeviceStatus::from_code(code);
                    status = Some(s);
                    format!("device status: {s}")
                }
                Verb::Lock => {
                    format!("successfully disabled developer mode! result code {code:#x}")
                }
                Verb::Unlock => {
                    format!("successfully enabled developer mode! result code {code:#x}")
                }
                Verb::SwitchInt => format!(
                    "successfully switched to internal environment! result code {code:#x}"
                ),
            },
            Err(err) => format!("error: {}", describe_error(err.code)),
        };
        Self {
            verb,
            success: response.is_success(),
            code,
            status,
            message,
        }
    }
}

/// Client bound to one open connection.
pub struct DevModeClient<S> {
    conn: Connection<S>,
}

impl<S: Read + Write> DevModeClient<S> {
    pub fn new(conn: Connection<S>) -> Self {
        Self { conn }
    }

    /// Query whether the device is registered for developer mode.
    pub fn status(&mut self) -> Result<Report> {
        self.send(Verb::Status, &Request::Status)
    }

    /// Disable developer mode.
    pub fn lock(&mut self, cookie: &str) -> Result<Report> {
        self.send(Verb::Lock, &Request::Lock { cookie })
    }

    /// Enable developer mode against `environment`.
    pub fn unlock(&mut self, cookie: &str, environment: Environment) -> Result<Report> {
        self.send(
            Verb::Unlock,
            &Request::Unlock {
                cookie,
                environment,
            },
        )
    }

    /// Switch the device to the internal environment.
    pub fn switch_to_internal(&mut self) -> Result<Report> {
        self.send(Verb::SwitchInt, &Request::SwitchToInternal)
    }

    /// Run `verb` with the cookie and environment from `config`.
    pub fn execute(&mut self, verb: Verb, config: &ClientConfig) -> Result<Report> {
        match verb {
            Verb::Status => self.status(),
            Verb::Lock => self.lock(&config.cookie),
            Verb::Unlock => self.unlock(&config.cookie, config.environment),
            Verb::SwitchInt => self.switch_to_internal(),
        }
    }

    fn send(&mut self, verb: Verb, request: &Request<'_>) -> Result<Report> {
        let response = self.conn.exchange(request)?;
        if let Err(err) = response.into_result() {
            if !err.is_known() {
                warn!("{} returned unrecognised error code {:#x}", verb, err.code);
            }
        }
        let report = Report::from_response(verb, response);
        info!(
            "{} finished: success={} code={:#x}",
            verb, report.success, report.code
        );
        Ok(report)
    }
}

/// Connect per `config`, run `verb`, and close the connection.
pub fn run(verb: Verb, config: &ClientConfig) -> Result<Report> {
    let conn = connect(config.socket_addr())?;
    DevModeClient::new(conn).execute(verb, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ResponseKind;

    fn result(verb: Verb, code: u32) -> Report {
        Report::from_response(
            verb,
            Response {
                kind: ResponseKind::Result,
                code,
            },
        )
    }

    fn error(verb: Verb, code: u32) -> Report {
        Report::from_response(
            verb,
            Response {
                kind: ResponseKind::Error,
                code,
            },
        )
    }

    #[test]
    fn test_status_messages() {
        let registered = result(Verb::Status, 2);
        assert_eq!(registered.message, "device status: registered");
        assert_eq!(registered.status, Some(DeviceStatus::Registered));

        assert_eq!(
            result(Verb::Status, 1).message,
            "device status: unregistered"
        );
        assert_eq!(result(Verb::Status, 7).message, "device status: unknown");
    }

    #[test]
    fn test_success_messages_include_hex_code() {
        assert_eq!(
            result(Verb::Lock, 0).message,
            "successfully disabled developer mode! result code 0x0"
        );
        assert_eq!(
            result(Verb::Unlock, 0x1f).message,
            "successfully enabled developer mode! result code 0x1f"
        );
        assert_eq!(
            result(Verb::SwitchInt, 3).message,
            "successfully switched to internal environment! result code 0x3"
        );
        assert_eq!(result(Verb::Lock, 0).status, None);
    }

    #[test]
    fn test_error_messages() {
        let report = error(Verb::Unlock, 0x12);
        assert!(!report.success);
        assert_eq!(report.code, 0x12);
        assert_eq!(report.message, "error: device has dev unlocking disabled");
        assert_eq!(report.status, None);

        assert_eq!(
            error(Verb::Status, 0xABC).message,
            "error: unknown 0xabc"
        );
    }

    #[test]
    fn test_report_json() {
        let json = serde_json::to_value(result(Verb::Status, 1)).unwrap();
        assert_eq!(json["verb"], "status");
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "unregistered");

        let json = serde_json::to_value(error(Verb::SwitchInt, 0xE)).unwrap();
        assert_eq!(json["verb"], "switchint");
        assert_eq!(json["code"], 14);
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_verb_display() {
        assert_eq!(Verb::SwitchInt.to_string(), "switchint");
        assert_eq!(Verb::Unlock.to_string(), "unlock");
    }
}
