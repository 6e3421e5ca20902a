//! Execution responses and return-value coercion.
//!
//! The remote interpreter returns an untyped [`RawValue`]; the caller knows
//! (or probes) what shape to expect.  Every coercion here treats a shape
//! mismatch as a normal *absent* outcome — callers routinely try a shape
//! before knowing what came back, so a miss must not be an error.
//!
//! The one exception is the point/size pair, which reports a missing value
//! as the sentinel `(-1, -1)` rather than `None`.  That sentinel is a
//! compatibility contract with existing drive scripts and is kept exactly.

use crate::value::{Point, Size};

/// A flat string-keyed record, in the order the wire delivered it.
pub type PropertyList = Vec<(String, RawValue)>;

// ── RawValue ──────────────────────────────────────────────────────────────────

/// An untyped value as decoded from the transport.
///
/// The drive protocol promises no more structure than this: scalars,
/// ordered sequences, and flat string-keyed records, nested arbitrarily.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// No value (a command statement, or an explicitly empty return).
    Nil,
    Str(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    List(Vec<RawValue>),
    Record(PropertyList),
}

impl RawValue {
    /// Numeric view: `Int` and `Double` both qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Int(n) => Some(*n as f64),
            RawValue::Double(x) => Some(*x),
            _ => None,
        }
    }

    /// String view; absent for non-strings.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean view; absent for non-booleans.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a flat record, or absent if it is not record-shaped.
    pub fn as_record(&self) -> Option<&PropertyList> {
        match self {
            RawValue::Record(entries) => Some(entries),
            _ => None,
        }
    }

    /// The value as a sequence of records.
    ///
    /// Absent if the value is not a sequence *or any element* is not
    /// record-shaped — a partially record-shaped list is not a record list.
    pub fn as_record_list(&self) -> Option<Vec<PropertyList>> {
        let items = match self {
            RawValue::List(items) => items,
            _ => return None,
        };
        items
            .iter()
            .map(|item| item.as_record().cloned())
            .collect()
    }

    /// The value as a point: the first two elements of a numeric sequence,
    /// truncated to integers.
    ///
    /// Returns the sentinel `(-1, -1)` — never absent — when the value is
    /// not a sequence of at least two numbers.  Kept for compatibility with
    /// existing scripts that test against `(-1, -1)`.
    pub fn as_point(&self) -> Point {
        if let RawValue::List(items) = self {
            if items.len() >= 2 {
                if let (Some(x), Some(y)) = (items[0].as_f64(), items[1].as_f64()) {
                    return Point::new(x as i32, y as i32);
                }
            }
        }
        Point::new(-1, -1)
    }

    /// The value as a sequence of points.
    ///
    /// Elements that are not numeric sequences of length ≥ 2 are silently
    /// skipped; absent only when the value itself is not a sequence.
    pub fn as_points(&self) -> Option<Vec<Point>> {
        let items = match self {
            RawValue::List(items) => items,
            _ => return None,
        };
        let mut points = Vec::new();
        for item in items {
            if let RawValue::List(coords) = item {
                if coords.len() >= 2 {
                    if let (Some(x), Some(y)) = (coords[0].as_f64(), coords[1].as_f64()) {
                        points.push(Point::new(x as i32, y as i32));
                    }
                }
            }
        }
        Some(points)
    }

    /// The value as a size; same truncation and sentinel rules as
    /// [`as_point`](RawValue::as_point), with `width = x`, `height = y`.
    pub fn as_size(&self) -> Size {
        let p = self.as_point();
        Size::new(p.x, p.y)
    }

    /// The value as a sequence of sizes; see [`as_points`](RawValue::as_points).
    pub fn as_sizes(&self) -> Option<Vec<Size>> {
        self.as_points()
            .map(|points| points.into_iter().map(|p| Size::new(p.x, p.y)).collect())
    }
}

/// Look a key up in a [`PropertyList`].
///
/// Record keys come from the interpreter and keep whatever case it used, so
/// the match here is exact.
pub fn property<'a>(record: &'a PropertyList, key: &str) -> Option<&'a RawValue> {
    record.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

// ── Response ──────────────────────────────────────────────────────────────────

/// The result of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Console output produced by the statement (e.g. `Put`, `Log`).
    pub output: String,
    /// Remote-side execution time, in seconds.
    pub duration: f64,
    /// The statement's return value; `Nil` for plain commands.
    pub return_value: RawValue,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
