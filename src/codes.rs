//! Device result and error codes.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Known device error codes.
static ERROR_MESSAGES: &[(u32, &str)] = &[
    (0xC, "device is locked, please unlock the screen"),
    (0xD, "device is locked on the internal environment"),
    (0xE, "device is already registered to the internal environment"),
    (0xF, "device already has a non-internal account registered"),
    (0x10, "device provisioning on internal environment failed"),
    (
        0x11,
        "device failed to initialise Windows Live on the internal environment",
    ),
    (0x12, "device has dev unlocking disabled"),
    (0x64, "device could not connect to developer services"),
    (
        0x8000_4001,
        "command not implemented on the device (0x80004001)",
    ),
];

/// Human-readable text for a device error code.
///
/// Unknown codes render as `unknown 0x…`.
///
/// # Example
///
/// ```
/// use devmode_client::codes::describe_error;
///
/// assert_eq!(describe_error(0x12), "device has dev unlocking disabled");
/// assert_eq!(describe_error(0x99999), "unknown 0x99999");
/// ```
pub fn describe_error(code: u32) -> Cow<'static, str> {
    ERROR_MESSAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, msg)| Cow::Borrowed(*msg))
        .unwrap_or_else(|| Cow::Owned(format!("unknown {code:#x}")))
}

/// Error code carried by an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceError {
    pub code: u32,
}

impl DeviceError {
    pub fn new(code: u32) -> Self {
        Self { code }
    }

    /// Check if the code is in the known table.
    pub fn is_known(&self) -> bool {
        ERROR_MESSAGES.iter().any(|(known, _)| *known == self.code)
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe_error(self.code))
    }
}

impl std::error::Error for DeviceError {}

/// Registration state returned by a successful status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Unregistered,
    Registered,
    Unknown,
}

impl DeviceStatus {
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => DeviceStatus::Unregistered,
            2 => DeviceStatus::Registered,
            _ => DeviceStatus::Unknown,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceStatus::Unregistered => f.write_str("unregistered"),
            DeviceStatus::Registered => f.write_str("registered"),
            DeviceStatus::Unknown => f.write_str("unknown"),
        }
    }
}
