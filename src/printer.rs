//! The canonical renderer, used for display and as the string-coercion
//! fallback.
//!
//! Reals print in fixed-point with six fractional digits, then trailing
//! zeros are trimmed without ever stripping the digit just right of the
//! dot (`3.0` stays `3.0`, `3.140000` becomes `3.14`). [`repr`] applies
//! the fixed output budget and truncates silently beyond it; the
//! `Display` impl on [`Value`] uses the same renderer without a budget.

use crate::object::{Atom, Object, Value};
use crate::REPR_MAX;

/// Render a value within the fixed output budget.
pub fn repr(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, REPR_MAX);
    out
}

/// Append the rendering of `value` to `out`, stopping at `limit` bytes.
pub(crate) fn write_value(out: &mut String, value: &Value, limit: usize) {
    if out.len() >= limit {
        return;
    }

    match value.object() {
        None => push_limited(out, "nil", limit),
        Some(Object::Atom(atom)) => write_atom(out, atom, limit),
        Some(Object::Cell(_)) => {
            push_limited(out, "(", limit);
            write_value(out, &value.car(), limit);

            let mut cur = value.cdr();
            while !cur.is_nil() && out.len() < limit {
                if cur.is_cell() {
                    push_limited(out, " ", limit);
                    write_value(out, &cur.car(), limit);
                    cur = cur.cdr();
                } else {
                    // Improper tail.
                    push_limited(out, " . ", limit);
                    write_value(out, &cur, limit);
                    break;
                }
            }
            push_limited(out, ")", limit);
        }
    }
}

fn write_atom(out: &mut String, atom: &Atom, limit: usize) {
    match atom {
        Atom::Integer(i) => push_limited(out, &i.to_string(), limit),
        Atom::Real(r) => push_limited(out, &format_real(*r), limit),
        Atom::Str(s) => {
            push_limited(out, "\"", limit);
            push_limited(out, s, limit);
            push_limited(out, "\"", limit);
        }
        Atom::Symbol(s) => push_limited(out, s, limit),
        Atom::Function(_) => push_limited(out, "<func>", limit),
        Atom::Builtin(_) => push_limited(out, "<builtin>", limit),
    }
}

/// Fixed-point with six fractional digits, trailing zeros trimmed but
/// never the digit immediately right of the dot.
pub(crate) fn format_real(real: f64) -> String {
    let mut text = format!("{real:.6}");
    loop {
        let bytes = text.as_bytes();
        let len = bytes.len();
        if len >= 2 && bytes[len - 1] == b'0' && bytes[len - 2] != b'.' {
            text.pop();
        } else {
            break;
        }
    }
    text
}

fn push_limited(out: &mut String, text: &str, limit: usize) {
    for ch in text.chars() {
        if out.len() + ch.len_utf8() > limit {
            break;
        }
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn nil_renders_as_nil() {
        assert_eq!(repr(&Value::nil()), "nil");
    }

    #[test]
    fn integers_render_in_decimal() {
        assert_eq!(repr(&Value::integer(0)), "0");
        assert_eq!(repr(&Value::integer(-42)), "-42");
        assert_eq!(repr(&Value::integer(i64::MIN)), i64::MIN.to_string());
    }

    #[test]
    fn reals_trim_trailing_zeros_but_keep_one_fraction_digit() {
        assert_eq!(repr(&Value::real(3.0)), "3.0");
        assert_eq!(repr(&Value::real(3.14)), "3.14");
        assert_eq!(repr(&Value::real(0.0)), "0.0");
        assert_eq!(repr(&Value::real(-0.5)), "-0.5");
        assert_eq!(repr(&Value::real(101.0)), "101.0");
        assert_eq!(repr(&Value::real(1.0 / 7.0)), "0.142857");
    }

    #[test]
    fn strings_render_with_quotes() {
        assert_eq!(repr(&Value::string("hi")), "\"hi\"");
        assert_eq!(repr(&Value::string("")), "\"\"");
    }

    #[test]
    fn symbols_render_bare() {
        assert_eq!(repr(&Value::symbol("foo-bar?")), "foo-bar?");
    }

    #[test]
    fn opaque_atoms_render_as_literals() {
        let func = Value::function(Value::nil(), Value::nil());
        assert_eq!(repr(&func), "<func>");

        let builtin = Value::builtin(Rc::new(|_, _| Ok(Value::nil())));
        assert_eq!(repr(&builtin), "<builtin>");
    }

    #[test]
    fn proper_lists_render_space_separated() {
        let l = Value::list([
            Value::integer(1),
            Value::integer(2),
            Value::integer(3),
        ]);
        assert_eq!(repr(&l), "(1 2 3)");
    }

    #[test]
    fn nested_lists_and_nil_elements() {
        let l = Value::list([
            Value::symbol("a"),
            Value::list([Value::symbol("b")]),
            Value::nil(),
        ]);
        assert_eq!(repr(&l), "(a (b) nil)");
    }

    #[test]
    fn improper_tails_render_dotted() {
        // (1 2 . 3)
        let improper = Value::cons(
            Value::integer(1),
            Value::cons(Value::integer(2), Value::integer(3)),
        );
        assert_eq!(repr(&improper), "(1 2 . 3)");

        // (a . "b")
        let pair = Value::cons(Value::symbol("a"), Value::string("b"));
        assert_eq!(repr(&pair), "(a . \"b\")");
    }

    #[test]
    fn mixed_numeric_list_matches_eval_output_shape() {
        let l = Value::list([
            Value::real(101.0),
            Value::integer(102),
            Value::real(103.0),
        ]);
        assert_eq!(repr(&l), "(101.0 102 103.0)");
    }

    #[test]
    fn output_is_truncated_at_the_budget() {
        let long = Value::list((0..2_000).map(Value::integer).collect::<Vec<_>>());
        let rendered = repr(&long);
        assert_eq!(rendered.len(), crate::REPR_MAX);
        // Truncation is silent: the rendering simply stops.
        assert!(rendered.starts_with("(0 1 2"));
    }

    #[test]
    fn display_is_unbudgeted() {
        let long = Value::list((0..2_000).map(Value::integer).collect::<Vec<_>>());
        assert!(long.to_string().len() > crate::REPR_MAX);
        assert!(long.to_string().ends_with("1999)"));
    }
}
