//! Client bridge for driving a remote SenseTalk interpreter.
//!
//! An EggDrive endpoint executes one SenseTalk statement per request and
//! answers with console output, a duration, and an untyped return value.
//! This crate does the two halves that are easy to get subtly wrong:
//!
//! - **Statement construction** — [`StatementBuilder`] and [`Value`] turn
//!   typed host values (points, rectangles, nested lists, strings with
//!   embedded quotes) into syntactically valid statement text.
//! - **Return-value coercion** — [`RawValue`] reinterprets the untyped
//!   reply in a caller-chosen shape; a shape mismatch is an ordinary
//!   absent outcome, not an error.
//!
//! [`Drive`] ties both to a [`Transport`] (XML-RPC over HTTP by default)
//! and adds the session-reclaim policy: a busy session can be forcibly
//! ended and the start retried once.
//!
//! # Quick start
//!
//! ```no_run
//! use eggdrive::{Drive, Point};
//!
//! let mut drive = Drive::with_url("http://10.0.0.5:5400");
//! drive.start_session(Some("/suites/login.suite"))?;
//! drive.click(Point::new(400, 300))?;
//! drive.type_text("hello")?;
//! let size = drive.remote_screen_size()?;
//! println!("SUT screen: {size}");
//! drive.end_session()?;
//! # Ok::<(), eggdrive::DriveError>(())
//! ```

pub mod driver;
pub mod fault;
pub mod response;
pub mod session;
pub mod statement;
pub mod transport;
pub mod value;

// Re-exports for convenience.
pub use driver::{ConnectOptions, ConnectionType, PinchAnchor, PinchOptions};
pub use fault::{DriveError, Fault, FaultCode};
pub use response::{property, PropertyList, RawValue, Response};
pub use session::Drive;
pub use statement::{StatementBuilder, StatementKind};
pub use transport::{Transport, TransportError, XmlRpcTransport, DEFAULT_URL};
pub use value::{quote, Point, Rect, Size, Value};
