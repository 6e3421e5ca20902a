//! SenseTalk statement construction.
//!
//! A statement is one textual unit handed to the remote interpreter: a
//! command (`Click (1, 2)`), a function call whose result is wanted
//! (`return ImageInfo("OK")`), or a bare expression (`return (1, 2)`).
//!
//! [`StatementBuilder`] accumulates the pieces and [`render`]s them.  The
//! grammar quirks it encodes:
//!
//! - ordered arguments always precede `name: value` property-list arguments;
//! - a command's argument list is parenthesized only when property-list
//!   arguments are present;
//! - a function's argument list is always parenthesized, and the call is
//!   wrapped in `return` so the interpreter hands the result back.
//!
//! [`render`]: StatementBuilder::render

use crate::value::{quote, Value};

// ── StatementKind ─────────────────────────────────────────────────────────────

/// The three statement shapes the builder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `return <expression>` — evaluates the name-or-expression; any
    /// accumulated arguments are ignored.
    Expression,
    /// `Name args…` — a command invoked for its side effect.
    Command,
    /// `return Name(args…)` — a function call wrapped as an expression.
    Function,
}

// ── StatementBuilder ──────────────────────────────────────────────────────────

/// Default command when none is given; `Put` is SenseTalk's no-op-ish echo.
const DEFAULT_COMMAND: &str = "Put";

/// Accumulates one statement's name, kind, and arguments, then renders it.
///
/// All `opt_*` methods silently skip `None`, so optional parameters can be
/// threaded straight through without call-site branching:
///
/// ```
/// use eggdrive::StatementBuilder;
///
/// let mut b = StatementBuilder::command("WaitFor");
/// b.opt_arg(None::<f64>).quoted_arg("OK button");
/// assert_eq!(b.render(), "WaitFor \"OK button\"");
/// ```
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    kind: StatementKind,
    name: Value,
    args: Vec<Value>,
    /// Property-list arguments, in insertion order, keys unique.
    named: Vec<(String, Value)>,
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self {
            kind: StatementKind::Command,
            name: Value::Str(DEFAULT_COMMAND.to_owned()),
            args: Vec::new(),
            named: Vec::new(),
        }
    }
}

impl StatementBuilder {
    /// A builder in the default state: the `Put` command with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// A command statement, e.g. `Click`.
    pub fn command(name: impl Into<String>) -> Self {
        Self {
            name: Value::Str(name.into()),
            ..Self::default()
        }
    }

    /// A function-call statement, e.g. `return ImageInfo(…)`.
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            kind: StatementKind::Function,
            name: Value::Str(name.into()),
            ..Self::default()
        }
    }

    /// A bare expression statement: `return <expression>`.
    pub fn expression(expression: impl Into<Value>) -> Self {
        Self {
            kind: StatementKind::Expression,
            name: expression.into(),
            ..Self::default()
        }
    }

    /// Return to the default state (`Put` command, no arguments) for reuse.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// The statement shape this builder will render.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    // ── Ordered arguments ────────────────────────────────────────────────────

    /// Append an ordered argument.
    pub fn arg(&mut self, value: impl Into<Value>) -> &mut Self {
        self.args.push(value.into());
        self
    }

    /// Append an ordered argument rendered as a quoted string literal.
    pub fn quoted_arg(&mut self, value: impl Into<Value>) -> &mut Self {
        let text = value.into().to_string();
        self.args.push(Value::Str(quote(&text)));
        self
    }

    /// Append an ordered argument, or do nothing for `None`.
    pub fn opt_arg(&mut self, value: Option<impl Into<Value>>) -> &mut Self {
        if let Some(v) = value {
            self.arg(v);
        }
        self
    }

    /// Append a quoted ordered argument, or do nothing for `None`.
    pub fn opt_quoted_arg(&mut self, value: Option<impl Into<Value>>) -> &mut Self {
        if let Some(v) = value {
            self.quoted_arg(v);
        }
        self
    }

    /// Append every element as an ordered argument.
    pub fn args<V: Into<Value>>(&mut self, values: impl IntoIterator<Item = V>) -> &mut Self {
        for v in values {
            self.arg(v);
        }
        self
    }

    /// Append every element as a quoted ordered argument.
    pub fn quoted_args<V: Into<Value>>(
        &mut self,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        for v in values {
            self.quoted_arg(v);
        }
        self
    }

    // ── Property-list arguments ──────────────────────────────────────────────

    /// Append a `key: value` property-list argument.
    ///
    /// Re-adding an existing key replaces its value in place; insertion
    /// order is otherwise preserved.
    pub fn named_arg(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.named.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.named.push((key, value));
        }
        self
    }

    /// Append a property-list argument whose value is quoted as a string
    /// literal.
    pub fn quoted_named_arg(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        let text = value.into().to_string();
        self.named_arg(key, Value::Str(quote(&text)))
    }

    /// Append a property-list argument, or do nothing for `None`.
    pub fn opt_named_arg(
        &mut self,
        key: impl Into<String>,
        value: Option<impl Into<Value>>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.named_arg(key, v);
        }
        self
    }

    /// Append a quoted property-list argument, or do nothing for `None`.
    pub fn opt_quoted_named_arg(
        &mut self,
        key: impl Into<String>,
        value: Option<impl Into<Value>>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.quoted_named_arg(key, v);
        }
        self
    }

    /// Append every `(key, value)` pair as a property-list argument.
    pub fn named_args<K: Into<String>, V: Into<Value>>(
        &mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self {
        for (k, v) in pairs {
            self.named_arg(k, v);
        }
        self
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Ordered arguments, then property-list arguments, comma-joined.
    fn argument_list(&self) -> String {
        let mut out = String::new();
        for v in &self.args {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&v.to_string());
        }
        for (k, v) in &self.named {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(k);
            out.push_str(": ");
            out.push_str(&v.to_string());
        }
        out
    }

    /// Render the statement text.  Pure: does not mutate the builder and
    /// returns the same text on every call.
    pub fn render(&self) -> String {
        match self.kind {
            StatementKind::Expression => format!("return {}", self.name),
            StatementKind::Command => {
                let list = self.argument_list();
                if !self.named.is_empty() {
                    format!("{} ({list})", self.name)
                } else if !self.args.is_empty() {
                    format!("{} {list}", self.name)
                } else {
                    self.name.to_string()
                }
            }
            StatementKind::Function => {
                format!("return {}({})", self.name, self.argument_list())
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Point;

    #[test]
    fn default_is_bare_put() {
        assert_eq!(StatementBuilder::new().render(), "Put");
    }

    #[test]
    fn command_with_ordered_args_has_no_parens() {
        let mut b = StatementBuilder::command("Name");
        b.arg(1i64).arg(2i64);
        assert_eq!(b.render(), "Name 1, 2");
    }

    #[test]
    fn named_args_force_parens() {
        let mut b = StatementBuilder::command("Name");
        b.arg(1i64).arg(2i64).named_arg("A", 3i64);
        assert_eq!(b.render(), "Name (1, 2, A: 3)");
    }

    #[test]
    fn named_args_only_still_parenthesize() {
        let mut b = StatementBuilder::command("Name");
        b.named_arg("A", 1i64);
        assert_eq!(b.render(), "Name (A: 1)");
    }

    #[test]
    fn no_args_renders_bare_name() {
        assert_eq!(StatementBuilder::command("Name").render(), "Name");
    }

    #[test]
    fn function_always_parenthesizes() {
        let mut b = StatementBuilder::function("F");
        b.quoted_arg("x");
        assert_eq!(b.render(), "return F(\"x\")");
        assert_eq!(StatementBuilder::function("F").render(), "return F()");
    }

    #[test]
    fn function_with_named_args() {
        let mut b = StatementBuilder::function("ReadText");
        b.arg(Point::new(5, 6)).named_arg("Language", "en");
        assert_eq!(b.render(), "return ReadText((5, 6), Language: en)");
    }

    #[test]
    fn expression_ignores_accumulated_args() {
        let mut b = StatementBuilder::expression(Point::new(1, 2));
        b.arg(99i64).named_arg("A", 1i64);
        assert_eq!(b.render(), "return (1, 2)");
    }

    #[test]
    fn ordered_args_precede_named_args() {
        let mut b = StatementBuilder::command("Connect");
        b.named_arg("Port", 5900i64);
        b.arg("first");
        assert_eq!(b.render(), "Connect (first, Port: 5900)");
    }

    #[test]
    fn named_arg_insertion_order_preserved() {
        let mut b = StatementBuilder::command("Pinch");
        b.named_arg("At", Point::new(1, 1))
            .named_arg("Distance", 50i64)
            .named_arg("Duration", 2i64);
        assert_eq!(b.render(), "Pinch (At: (1, 1), Distance: 50, Duration: 2)");
    }

    #[test]
    fn named_arg_rewrite_keeps_position() {
        let mut b = StatementBuilder::command("C");
        b.named_arg("A", 1i64).named_arg("B", 2i64).named_arg("A", 9i64);
        assert_eq!(b.render(), "C (A: 9, B: 2)");
    }

    #[test]
    fn quoted_arg_embeds_quote_splices() {
        let mut b = StatementBuilder::command("Log");
        b.quoted_arg("say \"hi\"");
        assert_eq!(b.render(), "Log \"say \" & quote & \"hi\" & quote & \"\"");
    }

    #[test]
    fn opt_methods_skip_none() {
        let mut b = StatementBuilder::command("WaitFor");
        b.opt_arg(None::<f64>)
            .opt_quoted_arg(None::<&str>)
            .opt_named_arg("Timeout", None::<f64>)
            .opt_quoted_named_arg("Image", None::<&str>);
        assert_eq!(b.render(), "WaitFor");
    }

    #[test]
    fn opt_methods_add_some() {
        let mut b = StatementBuilder::command("WaitFor");
        b.opt_arg(Some(2.5f64)).opt_quoted_arg(Some("OK"));
        assert_eq!(b.render(), "WaitFor 2.5, \"OK\"");
    }

    #[test]
    fn render_is_idempotent() {
        let mut b = StatementBuilder::command("Click");
        b.arg(Point::new(3, 4));
        let first = b.render();
        assert_eq!(b.render(), first);
        assert_eq!(b.render(), "Click (3, 4)");
    }

    #[test]
    fn reset_matches_fresh_builder() {
        let mut b = StatementBuilder::function("ImageInfo");
        b.quoted_arg("a").named_arg("B", 2i64);
        b.reset();
        assert_eq!(b.render(), StatementBuilder::new().render());
    }

    #[test]
    fn args_bulk() {
        let mut b = StatementBuilder::command("Drag");
        b.args([Point::new(1, 2), Point::new(3, 4)]);
        assert_eq!(b.render(), "Drag (1, 2), (3, 4)");
    }

    #[test]
    fn quoted_args_bulk() {
        let mut b = StatementBuilder::function("ImageFound");
        b.quoted_args(["a", "b"]);
        assert_eq!(b.render(), "return ImageFound(\"a\", \"b\")");
    }
}
