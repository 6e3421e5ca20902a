//! Session lifecycle over a [`Transport`].
//!
//! The remote side holds at most one session per endpoint, and a stale run
//! (or another caller) can leave one open.  [`Drive::start_session`]
//! therefore implements the reclaim policy: on a `SessionBusy` fault, end
//! the existing session and retry the start exactly once.  Only that one
//! fault is ever absorbed; everything else — including a fault from the
//! retry itself — surfaces typed and untouched.

use tracing::debug;

use crate::fault::{DriveError, FaultCode};
use crate::response::Response;
use crate::transport::{Transport, TransportError, XmlRpcTransport};

// ── Drive ─────────────────────────────────────────────────────────────────────

/// A drive endpoint: one transport plus the session-reclaim policy.
///
/// All operations are synchronous with a single call in flight.  The type
/// assumes one caller per endpoint; callers sharing an endpoint across
/// threads must serialize access themselves.
#[derive(Debug)]
pub struct Drive<T: Transport> {
    transport: T,
    /// When `true` (the default), a `SessionBusy` fault on session start
    /// forcibly ends the existing session and retries once.
    pub override_previous_session: bool,
}

impl Drive<XmlRpcTransport> {
    /// A drive against the default local endpoint.
    pub fn new() -> Self {
        Self::with_transport(XmlRpcTransport::default())
    }

    /// A drive against a specific endpoint URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::with_transport(XmlRpcTransport::new(url))
    }
}

impl Default for Drive<XmlRpcTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Drive<T> {
    /// A drive over an arbitrary transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            override_previous_session: true,
        }
    }

    /// Access the underlying transport (e.g. to change the endpoint URL).
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Start a session, optionally opening a remote suite.
    ///
    /// A `SessionBusy` fault triggers the reclaim path when
    /// [`override_previous_session`](Drive::override_previous_session) is
    /// set; any fault from the reclaim (ending the old session or the one
    /// retry) is surfaced as the final error.
    pub fn start_session(&mut self, suite_path: Option<&str>) -> Result<(), DriveError> {
        match suite_path {
            Some(path) => debug!(suite = path, "starting session"),
            None => debug!("starting session"),
        }

        match self.transport.start_session(suite_path) {
            Ok(()) => Ok(()),
            Err(TransportError::Fault(fault))
                if self.override_previous_session
                    && fault.fault_code() == Some(FaultCode::SessionBusy) =>
            {
                debug!("session busy; ending existing session and retrying");
                self.transport.end_session().map_err(into_drive_error)?;
                self.transport
                    .start_session(suite_path)
                    .map_err(into_drive_error)
            }
            Err(e) => Err(into_drive_error(e)),
        }
    }

    /// End the active session.  Faults (e.g. `NoActiveSession`) surface
    /// typed; nothing is retried.
    pub fn end_session(&mut self) -> Result<(), DriveError> {
        debug!("ending session");
        self.transport.end_session().map_err(into_drive_error)
    }

    /// Execute one statement in the active session.  Execution faults are
    /// never retried.
    pub fn execute(&mut self, statement: &str) -> Result<Response, DriveError> {
        debug!(statement, "executing");
        self.transport.execute(statement).map_err(into_drive_error)
    }
}

fn into_drive_error(e: TransportError) -> DriveError {
    match e {
        TransportError::Fault(fault) => fault.into(),
        TransportError::Other(source) => DriveError::Transport(source),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
