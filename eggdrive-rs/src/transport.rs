//! The drive transport contract and the XML-RPC connector.
//!
//! The session layer only needs three remote operations, all synchronous
//! with a single call in flight; [`Transport`] captures exactly that.
//! [`XmlRpcTransport`] is the production implementation, speaking XML-RPC
//! over HTTP to an EggDrive endpoint (default `http://localhost:5400`).

use std::fmt;

use xmlrpc::Request;

use crate::fault::Fault;
use crate::response::{RawValue, Response};

// ── TransportError ────────────────────────────────────────────────────────────

/// Failure of a single transport call.
#[derive(Debug)]
pub enum TransportError {
    /// The remote side answered with a (code, message) fault.
    Fault(Fault),
    /// The call never produced an answer: connection refused, malformed
    /// response, and so on.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Fault(fault) => {
                write!(f, "remote fault {}: {}", fault.code, fault.message)
            }
            TransportError::Other(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Fault(_) => None,
            TransportError::Other(e) => Some(e.as_ref()),
        }
    }
}

// ── Transport ─────────────────────────────────────────────────────────────────

/// The three remote operations the drive protocol needs.
///
/// Implementations are synchronous: each method issues one blocking
/// request and returns its outcome.  Timeouts, if any, live inside the
/// implementation and pass through unchanged.
pub trait Transport {
    /// Open a session, optionally against a remote suite path.
    fn start_session(&mut self, suite_path: Option<&str>) -> Result<(), TransportError>;

    /// Close the active session.
    fn end_session(&mut self) -> Result<(), TransportError>;

    /// Run one statement in the active session.
    fn execute(&mut self, statement: &str) -> Result<Response, TransportError>;
}

// ── XmlRpcTransport ───────────────────────────────────────────────────────────

/// Default EggDrive endpoint.
pub const DEFAULT_URL: &str = "http://localhost:5400";

/// Blocking XML-RPC connector to an EggDrive endpoint.
#[derive(Debug, Clone)]
pub struct XmlRpcTransport {
    url: String,
}

impl Default for XmlRpcTransport {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl XmlRpcTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    fn call(&self, request: Request<'_>) -> Result<xmlrpc::Value, TransportError> {
        request.call_url(&self.url).map_err(|e| {
            if let Some(fault) = e.fault() {
                TransportError::Fault(Fault::new(fault.fault_code, fault.fault_string.clone()))
            } else {
                TransportError::Other(Box::new(e))
            }
        })
    }
}

impl Transport for XmlRpcTransport {
    fn start_session(&mut self, suite_path: Option<&str>) -> Result<(), TransportError> {
        let request = match suite_path {
            Some(path) => Request::new("StartSession").arg(path),
            None => Request::new("StartSession"),
        };
        self.call(request).map(|_| ())
    }

    fn end_session(&mut self) -> Result<(), TransportError> {
        self.call(Request::new("EndSession")).map(|_| ())
    }

    fn execute(&mut self, statement: &str) -> Result<Response, TransportError> {
        self.call(Request::new("Execute").arg(statement))
            .map(response_from_wire)
    }
}

// ── Wire decoding ─────────────────────────────────────────────────────────────

/// Decode an XML-RPC value into the transport-agnostic [`RawValue`] union.
///
/// Struct member order is whatever the XML-RPC layer hands back (sorted by
/// key).  `DateTime` and `Base64` never occur in drive responses; they get
/// a readable string form rather than a decode failure.
fn raw_from_wire(value: xmlrpc::Value) -> RawValue {
    match value {
        xmlrpc::Value::Nil => RawValue::Nil,
        xmlrpc::Value::Bool(b) => RawValue::Bool(b),
        xmlrpc::Value::Int(n) => RawValue::Int(n as i64),
        xmlrpc::Value::Int64(n) => RawValue::Int(n),
        xmlrpc::Value::Double(x) => RawValue::Double(x),
        xmlrpc::Value::String(s) => RawValue::Str(s),
        xmlrpc::Value::DateTime(dt) => RawValue::Str(format!("{dt:?}")),
        xmlrpc::Value::Base64(bytes) => {
            RawValue::Str(String::from_utf8_lossy(&bytes).into_owned())
        }
        xmlrpc::Value::Array(items) => {
            RawValue::List(items.into_iter().map(raw_from_wire).collect())
        }
        xmlrpc::Value::Struct(members) => RawValue::Record(
            members
                .into_iter()
                .map(|(k, v)| (k, raw_from_wire(v)))
                .collect(),
        ),
    }
}

/// Decode an `Execute` reply.
///
/// The reply is a struct with `Output`, `Duration`, and `ReturnValue`
/// members; any missing member decodes to its empty form.
fn response_from_wire(value: xmlrpc::Value) -> Response {
    match value {
        xmlrpc::Value::Struct(mut members) => Response {
            output: match members.remove("Output") {
                Some(xmlrpc::Value::String(s)) => s,
                _ => String::new(),
            },
            duration: match members.remove("Duration") {
                Some(xmlrpc::Value::Double(x)) => x,
                Some(xmlrpc::Value::Int(n)) => n as f64,
                _ => 0.0,
            },
            return_value: members
                .remove("ReturnValue")
                .map(raw_from_wire)
                .unwrap_or(RawValue::Nil),
        },
        // Not struct-shaped at all: surface whatever came back as the
        // return value so the caller can still probe it.
        other => Response {
            output: String::new(),
            duration: 0.0,
            return_value: raw_from_wire(other),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn scalars_decode() {
        assert_eq!(raw_from_wire(xmlrpc::Value::Nil), RawValue::Nil);
        assert_eq!(raw_from_wire(xmlrpc::Value::Bool(true)), RawValue::Bool(true));
        assert_eq!(raw_from_wire(xmlrpc::Value::Int(3)), RawValue::Int(3));
        assert_eq!(raw_from_wire(xmlrpc::Value::Int64(1 << 40)), RawValue::Int(1 << 40));
        assert_eq!(raw_from_wire(xmlrpc::Value::Double(2.5)), RawValue::Double(2.5));
        assert_eq!(
            raw_from_wire(xmlrpc::Value::String("hi".into())),
            RawValue::Str("hi".into())
        );
    }

    #[test]
    fn arrays_decode_recursively() {
        let wire = xmlrpc::Value::Array(vec![
            xmlrpc::Value::Double(1.0),
            xmlrpc::Value::Array(vec![xmlrpc::Value::Int(2)]),
        ]);
        assert_eq!(
            raw_from_wire(wire),
            RawValue::List(vec![
                RawValue::Double(1.0),
                RawValue::List(vec![RawValue::Int(2)]),
            ])
        );
    }

    #[test]
    fn structs_decode_to_records() {
        let mut members = BTreeMap::new();
        members.insert("Name".to_owned(), xmlrpc::Value::String("laptop".into()));
        members.insert("Port".to_owned(), xmlrpc::Value::Int(5900));
        let raw = raw_from_wire(xmlrpc::Value::Struct(members));
        let record = raw.as_record().unwrap();
        assert_eq!(record.len(), 2);
        assert!(record.contains(&("Port".to_owned(), RawValue::Int(5900))));
    }

    #[test]
    fn execute_reply_decodes_members() {
        let mut members = BTreeMap::new();
        members.insert("Output".to_owned(), xmlrpc::Value::String("hello\n".into()));
        members.insert("Duration".to_owned(), xmlrpc::Value::Double(0.25));
        members.insert(
            "ReturnValue".to_owned(),
            xmlrpc::Value::Array(vec![xmlrpc::Value::Double(1.0), xmlrpc::Value::Double(2.0)]),
        );
        let resp = response_from_wire(xmlrpc::Value::Struct(members));
        assert_eq!(resp.output, "hello\n");
        assert_eq!(resp.duration, 0.25);
        assert_eq!(resp.return_value.as_point(), crate::value::Point::new(1, 2));
    }

    #[test]
    fn execute_reply_tolerates_missing_members() {
        let resp = response_from_wire(xmlrpc::Value::Struct(BTreeMap::new()));
        assert_eq!(resp.output, "");
        assert_eq!(resp.duration, 0.0);
        assert_eq!(resp.return_value, RawValue::Nil);
    }

    #[test]
    fn non_struct_reply_becomes_return_value() {
        let resp = response_from_wire(xmlrpc::Value::String("bare".into()));
        assert_eq!(resp.return_value, RawValue::Str("bare".into()));
        assert_eq!(resp.output, "");
    }

    #[test]
    fn default_url() {
        assert_eq!(XmlRpcTransport::default().url(), "http://localhost:5400");
        let mut t = XmlRpcTransport::new("http://10.0.0.2:5400");
        assert_eq!(t.url(), "http://10.0.0.2:5400");
        t.set_url("http://10.0.0.3:5400");
        assert_eq!(t.url(), "http://10.0.0.3:5400");
    }
}
