//! Verdicts and the monitoring-plugin reporting convention.
//!
//! A finished transaction reduces to one of four statuses, each mapped to
//! the conventional scheduler exit code (0 = OK, 1 = WARNING, 2 = CRITICAL,
//! 3 = UNKNOWN) and a fixed message prefix.

use serde::{Deserialize, Serialize};

/// Verdict severity, ordered by the conventional exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Process exit code the scheduler interprets.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    /// Fixed prefix for the verdict line.
    pub fn prefix(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARN",
            Status::Critical => "CRIT",
            Status::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Terminal verdict of one synthetic transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: Status,
    pub message: String,
}

impl Outcome {
    /// Create a verdict with an arbitrary status.
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// OK verdict.
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Status::Ok, message)
    }

    /// WARNING verdict.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Status::Warning, message)
    }

    /// CRITICAL verdict.
    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Status::Critical, message)
    }

    /// UNKNOWN verdict.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Status::Unknown, message)
    }

    /// Exit code of the verdict's status.
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// Print the verdict line to stdout and terminate the process.
    ///
    /// The line is the only output on stdout; diagnostics go to stderr. This
    /// never returns.
    pub fn report(self) -> ! {
        println!("{self}");
        std::process::exit(self.exit_code())
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.prefix(), self.message)
    }
}
