use proptest::prelude::*;

use eggdrive::{quote, Point, RawValue, Rect, StatementBuilder, Value};

/// Invert the quote-splice encoding: strip the outer quotes, then turn each
/// `" & quote & "` splice back into a literal `"`.  This is what the target
/// grammar does when it evaluates the literal.
fn unsplice(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\" & quote & \"", "\""))
}

proptest! {
    /// Quoting any string yields a literal that evaluates back to the
    /// original, for zero, one, adjacent, and many embedded quotes.
    #[test]
    fn quote_round_trips(s in "\\PC*") {
        let literal = quote(&s);
        prop_assert_eq!(unsplice(&literal).unwrap(), s);
    }
}

proptest! {
    /// A quoted literal never contains a bare `"` outside a splice: removing
    /// every splice leaves exactly the two delimiting quotes.
    #[test]
    fn quote_leaves_no_bare_quotes(s in "\\PC*") {
        let stripped = quote(&s).replace("\" & quote & \"", "");
        prop_assert_eq!(stripped.matches('"').count(), 2);
    }
}

proptest! {
    /// Point formatting is exactly `(x, y)`.
    #[test]
    fn point_formats_as_pair(x in i32::MIN..i32::MAX, y in i32::MIN..i32::MAX) {
        prop_assert_eq!(Point::new(x, y).to_string(), format!("({x}, {y})"));
    }
}

proptest! {
    /// Rectangle formatting is the two-corner form with absolute corners.
    #[test]
    fn rect_formats_as_two_corners(
        x in -10_000i32..10_000,
        y in -10_000i32..10_000,
        w in 0i32..10_000,
        h in 0i32..10_000,
    ) {
        prop_assert_eq!(
            Rect::new(x, y, w, h).to_string(),
            format!("(({}, {}), ({}, {}))", x, y, x + w, y + h)
        );
    }
}

proptest! {
    /// `render` is pure: repeated calls agree, and `reset` restores the
    /// default builder exactly.
    #[test]
    fn render_pure_and_reset_total(
        name in "[A-Za-z][A-Za-z0-9]{0,12}",
        args in prop::collection::vec(-1000i64..1000, 0..5),
    ) {
        let mut b = StatementBuilder::command(name.as_str());
        for a in &args {
            b.arg(*a);
        }
        b.named_arg("A", 1i64);
        let first = b.render();
        prop_assert_eq!(b.render(), first);

        b.reset();
        prop_assert_eq!(b.render(), StatementBuilder::new().render());
    }
}

proptest! {
    /// Point coercion is total over numeric pairs: any two doubles coerce to
    /// the truncated pair, never the sentinel.
    #[test]
    fn point_coercion_truncates(x in -1e6f64..1e6, y in -1e6f64..1e6) {
        let raw = RawValue::List(vec![RawValue::Double(x), RawValue::Double(y)]);
        prop_assert_eq!(raw.as_point(), Point::new(x as i32, y as i32));
    }
}

proptest! {
    /// Formatting a list of points parenthesizes and comma-joins each
    /// rendered point, recursively.
    #[test]
    fn list_of_points_formats_recursively(
        pts in prop::collection::vec((-100i32..100, -100i32..100), 1..6),
    ) {
        let value = Value::List(
            pts.iter().map(|&(x, y)| Value::Point(Point::new(x, y))).collect(),
        );
        let expected = format!(
            "({})",
            pts.iter()
                .map(|&(x, y)| format!("({x}, {y})"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        prop_assert_eq!(value.to_string(), expected);
    }
}
