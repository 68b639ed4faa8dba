use std::fmt;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::constants::severity_ids;

/// Severity of a log block. Larger codes are more severe; the codes are
/// thresholds onto which external leveled-logging facilities map their own
/// levels.
#[repr(i32)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    TryFromPrimitive, Serialize, Deserialize,
)]
pub enum Severity {
    Debug   = severity_ids::DEBUG,
    Info    = severity_ids::INFO,
    Warning = severity_ids::WARNING,
    Error   = severity_ids::ERROR,
    Fatal   = severity_ids::FATAL,
}

impl Severity {
    /// Wire code of this severity.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Map an arbitrary code onto the ordered threshold set: the largest
    /// severity whose code is not above `raw`, clamped at both ends. The
    /// five canonical codes map onto themselves, so decoded severities
    /// round-trip exactly.
    pub fn from_threshold(raw: i32) -> Self {
        if raw >= severity_ids::FATAL {
            Severity::Fatal
        } else if raw >= severity_ids::ERROR {
            Severity::Error
        } else if raw >= severity_ids::WARNING {
            Severity::Warning
        } else if raw >= severity_ids::INFO {
            Severity::Info
        } else {
            Severity::Debug
        }
    }

    /// Closest `log` crate level.
    pub fn to_level(self) -> log::Level {
        match self {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            // The log facade has no level above Error.
            Severity::Error | Severity::Fatal => log::Level::Error,
        }
    }

    /// Severity corresponding to a `log` crate level.
    pub fn from_level(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warning,
            log::Level::Error => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// One structured diagnostic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    /// Seconds since the Unix epoch.
    pub time: f64,
    pub severity: Severity,
    pub module: String,
    pub message: String,
}

impl LogMessage {
    pub fn new(
        time: f64,
        severity: Severity,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self { time, severity, module: module.into(), message: message.into() }
    }

    /// A record stamped with the current wall-clock time.
    pub fn now(
        severity: Severity,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now();
        let time = now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) * 1e-6;
        Self::new(time, severity, module, message)
    }
}
