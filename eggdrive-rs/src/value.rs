//! Host-side values and their SenseTalk literal rendering.
//!
//! Everything sent to the remote interpreter is ultimately text, so each
//! [`Value`] variant knows exactly one way to render itself as a SenseTalk
//! literal.  The union is closed on purpose: a two-element list and a point
//! render identically, and only the variant tag keeps the two apart.

use std::fmt;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A screen coordinate, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A width/height pair, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.width, self.height)
    }
}

/// An axis-aligned screen rectangle.
///
/// SenseTalk expects rectangles as two absolute corner points, so the
/// width/height form is normalized away at render time — see the
/// [`Display`](Rect#impl-Display-for-Rect) impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Upper-left corner.
    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Lower-right corner (`x + width`, `y + height`).
    pub const fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.top_left(), self.bottom_right())
    }
}

// ── Value ─────────────────────────────────────────────────────────────────────

/// A host value destined for a SenseTalk statement.
///
/// Rendering rules (the `Display` impl):
///
/// | variant  | rendered as                                |
/// |----------|--------------------------------------------|
/// | `Str`    | the text, verbatim (see [`quote`])         |
/// | `Bool`   | `true` / `false`                           |
/// | `Int`    | decimal                                    |
/// | `Float`  | shortest round-trip decimal                |
/// | `Point`  | `(x, y)`                                   |
/// | `Size`   | `(width, height)`                          |
/// | `Rect`   | `((left, top), (right, bottom))`           |
/// | `Entry`  | `key: value`                               |
/// | `List`   | `(a, b, c)`, elements rendered recursively |
///
/// `Str` is *not* quoted here; quoting a string turns it into a literal,
/// while an unquoted string is an expression fragment.  Callers choose via
/// [`quote`] or the builder's `quoted_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Point(Point),
    Size(Size),
    Rect(Rect),
    /// A single `key: value` pair, for property-list values nested inside
    /// ordinary argument positions.
    Entry(String, Box<Value>),
    List(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Point(p) => write!(f, "{p}"),
            Value::Size(s) => write!(f, "{s}"),
            Value::Rect(r) => write!(f, "{r}"),
            Value::Entry(key, value) => write!(f, "{key}: {value}"),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl Value {
    /// Convenience for a quoted string-literal value.
    ///
    /// `Value::quoted("a \"b\"")` renders as `"a " & quote & "b" & quote & ""`.
    pub fn quoted(s: &str) -> Value {
        Value::Str(quote(s))
    }

    /// A `key: value` entry.
    pub fn entry(key: impl Into<String>, value: impl Into<Value>) -> Value {
        Value::Entry(key.into(), Box::new(value.into()))
    }
}

// ── Quoting ───────────────────────────────────────────────────────────────────

/// Turn arbitrary text into a SenseTalk string literal.
///
/// SenseTalk has no backslash escape for an embedded `"`; the literal must
/// be closed, the `quote` constant concatenated, and the literal reopened.
/// Each embedded quote therefore becomes the splice `" & quote & "`:
///
/// ```
/// use eggdrive::quote;
///
/// assert_eq!(quote("plain"), "\"plain\"");
/// assert_eq!(quote("say \"hi\""), "\"say \" & quote & \"hi\" & quote & \"\"");
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    out.push_str(&s.replace('"', "\" & quote & \""));
    out.push('"');
    out
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Value::Point(p)
    }
}

impl From<Size> for Value {
    fn from(s: Size) -> Self {
        Value::Size(s)
    }
}

impl From<Rect> for Value {
    fn from(r: Rect) -> Self {
        Value::Rect(r)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_renders_verbatim() {
        assert_eq!(Value::from("MyImage").to_string(), "MyImage");
        assert_eq!(Value::from("has \"quotes\"").to_string(), "has \"quotes\"");
    }

    #[test]
    fn bool_renders_lowercase() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn numbers_render_naturally() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        // Whole floats drop the fraction, like the interpreter's own literals.
        assert_eq!(Value::Float(3.0).to_string(), "3");
    }

    #[test]
    fn point_renders_as_pair() {
        assert_eq!(Point::new(10, 20).to_string(), "(10, 20)");
        assert_eq!(Value::from(Point::new(-1, -1)).to_string(), "(-1, -1)");
    }

    #[test]
    fn size_renders_as_pair() {
        assert_eq!(Value::from(Size::new(800, 600)).to_string(), "(800, 600)");
    }

    #[test]
    fn rect_renders_as_two_corners() {
        // (x, y, w, h) = (1, 2, 30, 40) → corners (1, 2) and (31, 42).
        let r = Rect::new(1, 2, 30, 40);
        assert_eq!(r.to_string(), "((1, 2), (31, 42))");
        assert_eq!(r.top_left(), Point::new(1, 2));
        assert_eq!(r.bottom_right(), Point::new(31, 42));
    }

    #[test]
    fn entry_renders_key_colon_value() {
        assert_eq!(Value::entry("WaitFor", 5i64).to_string(), "WaitFor: 5");
        assert_eq!(
            Value::entry("At", Point::new(3, 4)).to_string(),
            "At: (3, 4)"
        );
    }

    #[test]
    fn list_renders_parenthesized() {
        let v = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(v.to_string(), "(1, 2, 3)");
        assert_eq!(Value::List(vec![]).to_string(), "()");
    }

    #[test]
    fn nested_lists_render_recursively() {
        let v = Value::List(vec![
            Value::Point(Point::new(1, 2)),
            Value::List(vec![Value::from("a"), Value::Bool(true)]),
        ]);
        assert_eq!(v.to_string(), "((1, 2), (a, true))");
    }

    #[test]
    fn quote_plain_string() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("hello"), "\"hello\"");
    }

    #[test]
    fn quote_single_embedded_quote() {
        assert_eq!(quote("a\"b"), "\"a\" & quote & \"b\"");
    }

    #[test]
    fn quote_adjacent_embedded_quotes() {
        assert_eq!(quote("a\"\"b"), "\"a\" & quote & \"\" & quote & \"b\"");
    }

    #[test]
    fn quote_only_quotes() {
        assert_eq!(quote("\""), "\"\" & quote & \"\"");
    }

    #[test]
    fn quoted_value_is_a_literal() {
        assert_eq!(Value::quoted("OK").to_string(), "\"OK\"");
    }

    #[test]
    fn from_impls() {
        assert_eq!(Value::from(5i32), Value::Int(5));
        assert_eq!(Value::from(5u16), Value::Int(5));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
        assert_eq!(Value::from("x".to_owned()), Value::Str("x".into()));
        let v: Value = (&[1i64, 2][..]).into();
        assert_eq!(v, Value::List(vec![Value::Int(1), Value::Int(2)]));
    }
}
