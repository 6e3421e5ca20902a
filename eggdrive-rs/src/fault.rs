//! Fault codes and the typed error surface.
//!
//! The remote side signals failure as a numeric code plus a message.  The
//! code set is closed; anything outside it is treated as a generic remote
//! exception while the raw number is kept for diagnostics.

use thiserror::Error;

// ── FaultCode ─────────────────────────────────────────────────────────────────

/// The drive protocol's closed set of fault codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    NoError = 0,
    UnknownMethod = 1,
    /// A session is already active on the endpoint.
    SessionBusy = 2,
    /// `Execute`/`EndSession` issued with no session started.
    NoActiveSession = 3,
    /// The statement raised inside the interpreter.
    Exception = 4,
    /// The session's suite failed to open.
    SessionSuiteFailure = 5,
}

impl FaultCode {
    /// Decode a wire code; `None` for codes outside the known set.
    pub fn from_code(code: i32) -> Option<FaultCode> {
        match code {
            0 => Some(FaultCode::NoError),
            1 => Some(FaultCode::UnknownMethod),
            2 => Some(FaultCode::SessionBusy),
            3 => Some(FaultCode::NoActiveSession),
            4 => Some(FaultCode::Exception),
            5 => Some(FaultCode::SessionSuiteFailure),
            _ => None,
        }
    }

    /// The numeric wire form.
    pub fn code(self) -> i32 {
        self as i32
    }
}

// ── Fault ─────────────────────────────────────────────────────────────────────

/// A raw (code, message) fault pair as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub code: i32,
    pub message: String,
}

impl Fault {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The typed code, if the raw number is in the known set.
    pub fn fault_code(&self) -> Option<FaultCode> {
        FaultCode::from_code(self.code)
    }
}

// ── DriveError ────────────────────────────────────────────────────────────────

/// Failure outcome of a drive call.
///
/// Remote faults keep both the decoded [`FaultCode`] and the raw wire code;
/// unknown codes decode as [`FaultCode::Exception`] so callers can always
/// match on the typed enum.
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("drive fault {raw_code} ({code:?}): {message}")]
    Fault {
        code: FaultCode,
        raw_code: i32,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DriveError {
    /// The typed fault code, when this error is a remote fault.
    pub fn fault_code(&self) -> Option<FaultCode> {
        match self {
            DriveError::Fault { code, .. } => Some(*code),
            DriveError::Transport(_) => None,
        }
    }
}

impl From<Fault> for DriveError {
    fn from(fault: Fault) -> Self {
        DriveError::Fault {
            code: fault.fault_code().unwrap_or(FaultCode::Exception),
            raw_code: fault.code,
            message: fault.message,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
