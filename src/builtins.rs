//! The builtin operator library.
//!
//! Every entry shares the one native signature: raw, unevaluated
//! argument cells in, result out. Operators that need ordinary
//! call-by-value semantics evaluate their arguments up front through
//! the helpers here; the special operators (`quote`, `cond`, `and`,
//! `or`, `lambda`, `set`) evaluate selectively or not at all. The
//! whole library is installed into the root frame from one registry
//! table so the surface can be audited in one place.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::evaluator::Interp;
use crate::host::Stream;
use crate::object::{Atom, Object, Value};
use crate::printer;
use crate::Error;

/// Native operator implementation as stored in the registry.
type BuiltinFn = fn(&mut Interp, &Value) -> Result<Value, Error>;

const NEEDS_ONE_ARG: &str = "needs exactly one argument";
const NEEDS_TWO_ARGS: &str = "needs exactly two arguments";
const NEEDS_LTE_TWO_ARGS: &str = "accepts no more than two arguments";
const MATH_FAILED: &str = "math op failed";

/// The Lisp-visible builtin surface.
const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("set", builtin_set),
    ("+", builtin_add),
    ("-", builtin_sub),
    ("*", builtin_mul),
    ("/", builtin_div),
    ("mod", builtin_mod),
    ("car", builtin_car),
    ("cdr", builtin_cdr),
    ("cons", builtin_cons),
    ("eval", builtin_eval),
    ("reverse", builtin_reverse),
    ("list", builtin_list),
    ("quote", builtin_quote),
    ("lambda", builtin_lambda),
    ("cond", builtin_cond),
    ("true?", builtin_true_p),
    ("false?", builtin_false_p),
    ("atom?", builtin_atom_p),
    ("cell?", builtin_cell_p),
    ("nil?", builtin_nil_p),
    ("<", builtin_lt),
    ("<=", builtin_lte),
    (">", builtin_gt),
    (">=", builtin_gte),
    ("==", builtin_eq),
    ("and", builtin_and),
    ("or", builtin_or),
    ("typeof", builtin_typeof),
    ("println", builtin_println),
    ("prompt", builtin_prompt),
];

/// Install the builtin library and the `#t`/`#f` constants into the
/// root frame.
pub(crate) fn install(interp: &mut Interp) {
    for (name, func) in BUILTINS {
        let value = Value::builtin(Rc::new(*func));
        interp.scope.set(name, value);
    }

    let truth = interp.statics.truth.clone();
    let falsity = interp.statics.falsity.clone();
    interp.scope.set("#t", truth);
    interp.scope.set("#f", falsity);
}

//
// Argument helpers
//

/// Evaluate the single argument of a unary builtin. Calling with no
/// arguments is indistinguishable from a single nil argument.
fn eval_one_arg(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    if !args.cdr().is_nil() {
        return Err(Error::BadArg(NEEDS_ONE_ARG.to_string()));
    }
    interp.eval_expr(&args.car())
}

/// Evaluate exactly two arguments, left to right.
fn eval_two_args(interp: &mut Interp, args: &Value) -> Result<(Value, Value), Error> {
    if args.is_nil() || args.cdr().is_nil() || !args.cdr().cdr().is_nil() {
        return Err(Error::BadArg(NEEDS_TWO_ARGS.to_string()));
    }
    let first = interp.eval_expr(&args.car())?;
    let second = interp.eval_expr(&args.cdr().car())?;
    Ok((first, second))
}

/// Evaluate at most two arguments; missing ones come back nil.
fn eval_upto_two_args(interp: &mut Interp, args: &Value) -> Result<(Value, Value), Error> {
    if !args.cdr().cdr().is_nil() {
        return Err(Error::BadArg(NEEDS_LTE_TWO_ARGS.to_string()));
    }
    let first = interp.eval_expr(&args.car())?;
    let second = interp.eval_expr(&args.cdr().car())?;
    Ok((first, second))
}

//
// Arithmetic
//

#[derive(Debug, Clone, Copy, PartialEq)]
enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// The fold accumulator: integer until a real operand promotes it.
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Real(f64),
}

impl Num {
    fn from_value(value: &Value) -> Result<Num, Error> {
        match value.object() {
            // nil counts as integer zero.
            None => Ok(Num::Int(0)),
            Some(Object::Atom(Atom::Integer(i))) => Ok(Num::Int(*i)),
            Some(Object::Atom(Atom::Real(r))) => Ok(Num::Real(*r)),
            _ => Err(Error::BadArg(MATH_FAILED.to_string())),
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Num::Int(i) => i == 0,
            Num::Real(r) => r == 0.0,
        }
    }

    fn as_real(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Real(r) => r,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(i) => Value::integer(i),
            Num::Real(r) => Value::real(r),
        }
    }
}

#[cfg(feature = "real-mod")]
fn real_mod(left: f64, right: f64) -> Result<f64, Error> {
    Ok(left % right)
}

#[cfg(not(feature = "real-mod"))]
fn real_mod(_left: f64, _right: f64) -> Result<f64, Error> {
    Err(Error::Unsupported(MATH_FAILED.to_string()))
}

fn math_step(acc: Num, operand: Num, op: MathOp) -> Result<Num, Error> {
    if matches!(op, MathOp::Div | MathOp::Mod) && operand.is_zero() {
        return Err(Error::BadArg(MATH_FAILED.to_string()));
    }

    match (acc, operand) {
        (Num::Int(left), Num::Int(right)) => {
            let result = match op {
                MathOp::Add => left.checked_add(right),
                MathOp::Sub => left.checked_sub(right),
                MathOp::Mul => left.checked_mul(right),
                MathOp::Div => left.checked_div(right),
                MathOp::Mod => left.checked_rem(right),
            };
            result
                .map(Num::Int)
                .ok_or_else(|| Error::Overflow("math op overflowed".to_string()))
        }
        (left, right) => {
            // Contact with a real promotes; once real, stays real.
            let (left, right) = (left.as_real(), right.as_real());
            let result = match op {
                MathOp::Add => left + right,
                MathOp::Sub => left - right,
                MathOp::Mul => left * right,
                MathOp::Div => left / right,
                MathOp::Mod => real_mod(left, right)?,
            };
            Ok(Num::Real(result))
        }
    }
}

/// Left fold over the evaluated operands. `+` and `*` fold everything
/// over their identity seed; `-`, `/`, and `mod` seed from the first
/// operand when two or more are given, seed zero for the unary form,
/// and yield zero outright with no operands.
fn math_fold(interp: &mut Interp, args: &Value, op: MathOp) -> Result<Value, Error> {
    let seeded = matches!(op, MathOp::Sub | MathOp::Div | MathOp::Mod);
    let operands: Vec<Value> = args.elements().collect();

    let mut acc = if op == MathOp::Mul {
        Num::Int(1)
    } else {
        Num::Int(0)
    };
    let mut rest = operands.as_slice();

    if seeded {
        if operands.is_empty() {
            return Ok(Value::integer(0));
        }
        if operands.len() >= 2 {
            let first = interp.eval_expr(&operands[0])?;
            acc = Num::from_value(&first)?;
            rest = &operands[1..];
        }
    }

    for expr in rest {
        let value = interp.eval_expr(expr)?;
        let operand = Num::from_value(&value)?;
        acc = math_step(acc, operand, op)?;
    }

    Ok(acc.into_value())
}

fn builtin_add(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    math_fold(interp, args, MathOp::Add)
}

fn builtin_sub(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    math_fold(interp, args, MathOp::Sub)
}

fn builtin_mul(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    math_fold(interp, args, MathOp::Mul)
}

fn builtin_div(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    math_fold(interp, args, MathOp::Div)
}

fn builtin_mod(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    math_fold(interp, args, MathOp::Mod)
}

//
// Comparison
//

#[derive(Debug, Clone, Copy)]
enum LogicOp {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
}

/// Comparison operand after nil-to-zero conversion.
#[derive(Debug, Clone)]
enum Scalar {
    Int(i64),
    Real(f64),
    Text(String),
}

fn scalar_of(value: &Value) -> Result<Scalar, Error> {
    match value.object() {
        None => Ok(Scalar::Int(0)),
        Some(Object::Atom(Atom::Integer(i))) => Ok(Scalar::Int(*i)),
        Some(Object::Atom(Atom::Real(r))) => Ok(Scalar::Real(*r)),
        Some(Object::Atom(Atom::Str(s))) => Ok(Scalar::Text(s.clone())),
        _ => Err(Error::BadArg(
            "logic op needs integer, real, or string operands".to_string(),
        )),
    }
}

/// Render a numeric scalar the way the printer would, for the string
/// rung of the promotion ladder.
fn scalar_text(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Int(i) => i.to_string(),
        Scalar::Real(r) => printer::format_real(*r),
        Scalar::Text(s) => s.clone(),
    }
}

/// Promotion ladder: integer -> real -> string.
fn promote(left: Scalar, right: Scalar) -> (Scalar, Scalar) {
    match (&left, &right) {
        (Scalar::Int(i), Scalar::Real(_)) => (Scalar::Real(*i as f64), right),
        (Scalar::Real(_), Scalar::Int(i)) => {
            let promoted = Scalar::Real(*i as f64);
            (left, promoted)
        }
        (Scalar::Text(_), Scalar::Int(_) | Scalar::Real(_)) => {
            let promoted = Scalar::Text(scalar_text(&right));
            (left, promoted)
        }
        (Scalar::Int(_) | Scalar::Real(_), Scalar::Text(_)) => {
            (Scalar::Text(scalar_text(&left)), right)
        }
        _ => (left, right),
    }
}

fn logic_op(interp: &mut Interp, args: &Value, op: LogicOp) -> Result<Value, Error> {
    let (left, right) = eval_two_args(interp, args)?;

    // Equality over static instances is identity-based.
    if matches!(op, LogicOp::Eq)
        && interp.statics.is_static(&left)
        && interp.statics.is_static(&right)
    {
        return Ok(interp.statics.bool_value(left.ptr_eq(&right)));
    }

    let (left, right) = promote(scalar_of(&left)?, scalar_of(&right)?);
    let ordering = match (&left, &right) {
        (Scalar::Int(a), Scalar::Int(b)) => Some(a.cmp(b)),
        // NaN orders with nothing, so every comparison on it is false.
        (Scalar::Real(a), Scalar::Real(b)) => a.partial_cmp(b),
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(b)),
        _ => return Err(Error::Bug("logic operands failed to promote".to_string())),
    };

    let truth = match ordering {
        None => false,
        Some(ord) => match op {
            LogicOp::Lt => ord == Ordering::Less,
            LogicOp::Lte => ord != Ordering::Greater,
            LogicOp::Gt => ord == Ordering::Greater,
            LogicOp::Gte => ord != Ordering::Less,
            LogicOp::Eq => ord == Ordering::Equal,
        },
    };

    Ok(interp.statics.bool_value(truth))
}

fn builtin_lt(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    logic_op(interp, args, LogicOp::Lt)
}

fn builtin_lte(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    logic_op(interp, args, LogicOp::Lte)
}

fn builtin_gt(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    logic_op(interp, args, LogicOp::Gt)
}

fn builtin_gte(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    logic_op(interp, args, LogicOp::Gte)
}

fn builtin_eq(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    logic_op(interp, args, LogicOp::Eq)
}

//
// Assignment
//

fn builtin_set(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let left = args.car();
    let right = args.cdr().car();
    let extra = args.cdr().cdr();

    let (name, value) = if left.is_symbol() && extra.is_nil() {
        // (set name value)
        let value = interp.eval_expr(&right)?;
        let name = left.symbol_name().map(str::to_string);
        (name, value)
    } else if left.is_cell() && left.car().is_symbol() {
        // (set (name p1 p2 ...) body...) is sugar for binding name to
        // (lambda (p1 p2 ...) body...).
        let value = Value::function(left.cdr(), args.cdr());
        let name = left.car().symbol_name().map(str::to_string);
        (name, value)
    } else {
        return Err(Error::BadArg("set - bad first operand".to_string()));
    };

    let name = name.ok_or_else(|| Error::Bug("set lost its symbol".to_string()))?;
    interp.scope.set(&name, value.clone());
    Ok(value)
}

//
// List primitives
//

fn builtin_car(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let value = eval_one_arg(interp, args)?;
    Ok(value.car())
}

fn builtin_cdr(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let value = eval_one_arg(interp, args)?;
    Ok(value.cdr())
}

fn builtin_cons(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let (car, cdr) = eval_upto_two_args(interp, args)?;
    Ok(Value::cons(car, cdr))
}

fn builtin_eval(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let value = eval_one_arg(interp, args)?;
    interp.eval_expr(&value)
}

fn builtin_reverse(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let value = eval_one_arg(interp, args)?;
    Ok(reverse_value(&value))
}

fn reverse_value(value: &Value) -> Value {
    if value.is_nil() || !value.is_cell() {
        return value.clone();
    }

    // A pair with a non-nil atom tail flips in place: (a . b) -> (b . a).
    let car = value.car();
    let cdr = value.cdr();
    if !car.is_nil() && cdr.is_atom() {
        return Value::cons(cdr, car);
    }

    let mut reversed = Value::nil();
    for item in value.elements() {
        reversed = Value::cons(item, reversed);
    }
    reversed
}

fn builtin_list(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let mut items = Vec::new();
    for expr in args.elements() {
        items.push(interp.eval_expr(&expr)?);
    }
    Ok(Value::list(items))
}

//
// Control
//

fn builtin_quote(_interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    if !args.cdr().is_nil() {
        return Err(Error::BadArg(NEEDS_ONE_ARG.to_string()));
    }
    Ok(args.car())
}

fn builtin_lambda(_interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    Ok(Value::function(args.car(), args.cdr()))
}

fn builtin_cond(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    for branch in args.elements() {
        if !branch.is_cell() || !branch.cdr().cdr().is_nil() {
            return Err(Error::BadArg(
                "cond branch needs two arguments".to_string(),
            ));
        }
        let test = interp.eval_expr(&branch.car())?;
        if test.is_truthy() {
            return interp.eval_expr(&branch.cdr().car());
        }
    }
    Ok(Value::nil())
}

fn builtin_and(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let mut last = interp.statics.truth.clone();
    for expr in args.elements() {
        last = interp.eval_expr(&expr)?;
        if !last.is_truthy() {
            return Ok(Value::nil());
        }
    }
    Ok(last)
}

fn builtin_or(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    for expr in args.elements() {
        let value = interp.eval_expr(&expr)?;
        if value.is_truthy() {
            return Ok(value);
        }
    }
    Ok(Value::nil())
}

//
// Predicates and introspection
//

fn unary_predicate(
    interp: &mut Interp,
    args: &Value,
    test: fn(&Value) -> bool,
) -> Result<Value, Error> {
    let value = eval_one_arg(interp, args)?;
    Ok(interp.statics.bool_value(test(&value)))
}

fn builtin_true_p(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    unary_predicate(interp, args, |v| v.is_truthy())
}

fn builtin_false_p(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    unary_predicate(interp, args, |v| !v.is_truthy())
}

fn builtin_atom_p(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    unary_predicate(interp, args, |v| v.is_atom())
}

fn builtin_cell_p(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    unary_predicate(interp, args, |v| v.is_cell())
}

fn builtin_nil_p(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    unary_predicate(interp, args, |v| v.is_nil())
}

fn builtin_typeof(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let value = eval_one_arg(interp, args)?;
    Ok(interp.statics.type_string(&value))
}

//
// I/O
//

fn builtin_println(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let value = eval_one_arg(interp, args)?;
    match value.string_text() {
        Some(text) => {
            let line = format!("{text}\n");
            interp.cb.print(Stream::Stdout, &line);
            Ok(Value::nil())
        }
        None => Err(Error::Unsupported(
            "cannot print non-string object".to_string(),
        )),
    }
}

fn builtin_prompt(interp: &mut Interp, args: &Value) -> Result<Value, Error> {
    let value = eval_one_arg(interp, args)?;
    if let Some(text) = value.string_text() {
        let text = text.to_string();
        interp.cb.print(Stream::Stdout, &text);
    }
    let line = read_line(interp)?;
    Ok(Value::string(line))
}

/// Read one line through the getchar callback, terminated by `\n` or
/// end of input.
fn read_line(interp: &mut Interp) -> Result<String, Error> {
    if !interp.cb.has_getchar() {
        return Err(Error::Unsupported(
            "host provides no character input".to_string(),
        ));
    }

    let mut bytes = Vec::new();
    loop {
        match interp.cb.getchar() {
            Some(b'\n') | None => break,
            Some(byte) => bytes.push(byte),
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Callbacks;
    use std::cell::RefCell;

    fn quiet_interp() -> Interp {
        Interp::with_callbacks(Callbacks::new(|_, _| {}))
    }

    #[test]
    fn every_registry_entry_is_installed() {
        let interp = quiet_interp();
        for (name, _) in BUILTINS {
            let bound = interp
                .scope
                .query(name)
                .unwrap_or_else(|| panic!("builtin '{name}' not installed"));
            assert_eq!(bound.type_name(), "builtin", "binding for '{name}'");
        }
        assert_eq!(interp.scope.query("#t"), Some(Value::integer(1)));
        assert_eq!(interp.scope.query("#f"), Some(Value::integer(0)));
    }

    #[test]
    fn boolean_constants_are_the_canonical_statics() {
        let interp = quiet_interp();
        let t = interp.scope.query("#t").unwrap();
        assert!(t.ptr_eq(&interp.statics.truth));
        let f = interp.scope.query("#f").unwrap();
        assert!(f.ptr_eq(&interp.statics.falsity));
    }

    #[test]
    fn math_step_promotes_and_checks() {
        let six = math_step(Num::Int(2), Num::Int(3), MathOp::Mul).unwrap();
        assert!(matches!(six, Num::Int(6)));

        let real = math_step(Num::Int(2), Num::Real(0.5), MathOp::Add).unwrap();
        assert!(matches!(real, Num::Real(r) if r == 2.5));

        let overflow = math_step(Num::Int(i64::MAX), Num::Int(1), MathOp::Add).unwrap_err();
        assert_eq!(overflow.code(), 5);

        let div_zero = math_step(Num::Int(1), Num::Int(0), MathOp::Div).unwrap_err();
        assert_eq!(div_zero.code(), 3);

        let real_div_zero =
            math_step(Num::Real(1.0), Num::Real(0.0), MathOp::Div).unwrap_err();
        assert_eq!(real_div_zero.code(), 3);
    }

    #[cfg(feature = "real-mod")]
    #[test]
    fn real_modulo_is_available_with_the_feature() {
        let mut interp = quiet_interp();
        let value = interp.eval("(mod 7.5 2.0)").unwrap();
        assert_eq!(value.to_string(), "1.5");
        let negative = interp.eval("(mod -7.5 2.0)").unwrap();
        assert_eq!(negative.to_string(), "-1.5");
    }

    #[cfg(not(feature = "real-mod"))]
    #[test]
    fn real_modulo_reports_unsupported_without_the_feature() {
        let mut interp = quiet_interp();
        let err = interp.eval("(mod 7.5 2.0)").unwrap_err();
        assert_eq!(err.code(), 4);
        // Integer modulo still works.
        assert_eq!(interp.eval("(mod 7 3)").unwrap(), Value::integer(1));
    }

    #[test]
    fn promotion_renders_numbers_like_the_printer() {
        let (l, r) = promote(Scalar::Real(3.0), Scalar::Text("3.0".to_string()));
        assert!(matches!(&l, Scalar::Text(t) if t == "3.0"));
        assert!(matches!(&r, Scalar::Text(t) if t == "3.0"));

        let (l, _) = promote(Scalar::Int(3), Scalar::Text("3.0".to_string()));
        assert!(matches!(&l, Scalar::Text(t) if t == "3"));
    }

    #[test]
    fn reverse_value_covers_the_shape_zoo() {
        assert!(reverse_value(&Value::nil()).is_nil());
        assert_eq!(reverse_value(&Value::integer(5)), Value::integer(5));

        let pair = Value::cons(Value::integer(1), Value::integer(2));
        assert_eq!(
            reverse_value(&pair),
            Value::cons(Value::integer(2), Value::integer(1))
        );

        let proper = Value::list([Value::integer(1), Value::integer(2), Value::integer(3)]);
        assert_eq!(
            reverse_value(&proper),
            Value::list([Value::integer(3), Value::integer(2), Value::integer(1)])
        );
    }

    #[test]
    fn println_writes_the_string_and_a_newline() {
        let sink = Rc::new(RefCell::new(String::new()));
        let tap = Rc::clone(&sink);
        let mut interp = Interp::with_callbacks(Callbacks::new(move |stream, text: &str| {
            assert_eq!(stream, Stream::Stdout);
            tap.borrow_mut().push_str(text);
        }));

        interp.eval("(println \"hello\")").unwrap();
        assert_eq!(sink.borrow().as_str(), "hello\n");

        let err = interp.eval("(println 42)").unwrap_err();
        assert_eq!(err.code(), 4);
        assert_eq!(err.message(), Some("cannot print non-string object"));
    }

    #[test]
    fn prompt_reads_a_line_through_getchar() {
        let mut feed = b"line one\nline two".to_vec();
        feed.reverse();
        let mut interp = Interp::with_callbacks(
            Callbacks::new(|_, _| {}).with_getchar(move || feed.pop()),
        );

        let first = interp.eval("(prompt)").unwrap();
        assert_eq!(first.string_text(), Some("line one"));

        // The second read ends at EOF instead of a newline.
        let second = interp.eval("(prompt)").unwrap();
        assert_eq!(second.string_text(), Some("line two"));
    }

    #[test]
    fn prompt_writes_its_string_argument_first() {
        let prompted = Rc::new(RefCell::new(String::new()));
        let tap = Rc::clone(&prompted);

        let mut feed = b"ok\n".to_vec();
        feed.reverse();
        let mut interp = Interp::with_callbacks(
            Callbacks::new(move |_, text: &str| {
                tap.borrow_mut().push_str(text);
            })
            .with_getchar(move || feed.pop()),
        );

        let value = interp.eval("(prompt \"name? \")").unwrap();
        assert_eq!(value.string_text(), Some("ok"));
        assert_eq!(prompted.borrow().as_str(), "name? ");
    }

    #[test]
    fn prompt_without_getchar_is_unsupported() {
        let mut interp = quiet_interp();
        let err = interp.eval("(prompt)").unwrap_err();
        assert_eq!(err.code(), 4);
    }
}
