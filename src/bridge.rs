//! The embedder bridge: registering native functions and reaching into
//! the scope chain from host code.
//!
//! A registered native function is wrapped in an ordinary builtin, so
//! it participates in evaluation like any other operator: it receives
//! its argument cells unevaluated, and pulls the ones it wants through
//! the [`FuncApi`] handle, which evaluates the i-th positional argument
//! on access and coerces it to the requested type. Closure capture
//! stands in for the traditional user pointer, and dropping the last
//! handle to the closure stands in for the destructor.

use std::rc::Rc;

use crate::evaluator::Interp;
use crate::lexer;
use crate::object::{Atom, Object, Value};
use crate::printer;
use crate::Error;

//
// Coercions
//

fn as_integer(value: &Value) -> Result<i64, Error> {
    match value.object() {
        None => Ok(0),
        Some(Object::Atom(Atom::Integer(i))) => Ok(*i),
        Some(Object::Atom(Atom::Real(r))) => Ok(*r as i64),
        Some(Object::Atom(Atom::Str(s))) => {
            if let Some(integer) = lexer::scan_integer(s) {
                Ok(integer)
            } else if let Some(real) = lexer::scan_real(s) {
                Ok(real as i64)
            } else {
                Err(Error::Unsupported(
                    "cannot coerce string to integer".to_string(),
                ))
            }
        }
        _ => Err(Error::Unsupported(
            "cannot coerce object to integer".to_string(),
        )),
    }
}

fn as_real(value: &Value) -> Result<f64, Error> {
    match value.object() {
        None => Ok(0.0),
        Some(Object::Atom(Atom::Integer(i))) => Ok(*i as f64),
        Some(Object::Atom(Atom::Real(r))) => Ok(*r),
        Some(Object::Atom(Atom::Str(s))) => {
            if let Some(integer) = lexer::scan_integer(s) {
                Ok(integer as f64)
            } else if let Some(real) = lexer::scan_real(s) {
                Ok(real)
            } else {
                Err(Error::Unsupported(
                    "cannot coerce string to real".to_string(),
                ))
            }
        }
        _ => Err(Error::Unsupported(
            "cannot coerce object to real".to_string(),
        )),
    }
}

fn as_string(value: &Value) -> String {
    match value.string_text() {
        Some(text) => text.to_string(),
        // Everything else falls back to the canonical renderer.
        None => printer::repr(value),
    }
}

/// The per-invocation handle passed to a registered native function.
///
/// Argument accessors evaluate the requested positional argument in
/// the current scope at the moment of the call - arguments the native
/// function never asks for are never evaluated.
pub struct FuncApi<'a> {
    interp: &'a mut Interp,
    args: Value,
    result: Value,
}

impl<'a> FuncApi<'a> {
    fn new(interp: &'a mut Interp, args: Value) -> FuncApi<'a> {
        FuncApi {
            interp,
            args,
            result: Value::nil(),
        }
    }

    fn arg(&mut self, index: usize) -> Result<Value, Error> {
        let mut cur = self.args.clone();
        for _ in 0..index {
            cur = cur.cdr();
        }
        let value = self.interp.eval_expr(&cur.car())?;
        if value.is_nil() {
            return Err(Error::Eval("nil argument to user function".to_string()));
        }
        Ok(value)
    }

    /// Evaluate the i-th argument and coerce it to an integer.
    pub fn arg_integer(&mut self, index: usize) -> Result<i64, Error> {
        as_integer(&self.arg(index)?)
    }

    /// Evaluate the i-th argument and coerce it to a real.
    pub fn arg_real(&mut self, index: usize) -> Result<f64, Error> {
        as_real(&self.arg(index)?)
    }

    /// Evaluate the i-th argument and coerce it to a string, rendering
    /// non-string objects with the printer.
    pub fn arg_string(&mut self, index: usize) -> Result<String, Error> {
        Ok(as_string(&self.arg(index)?))
    }

    /// Set the call's result to an integer, releasing any previous
    /// result.
    pub fn return_integer(&mut self, value: i64) {
        self.result = Value::integer(value);
    }

    /// Set the call's result to a real, releasing any previous result.
    pub fn return_real(&mut self, value: f64) {
        self.result = Value::real(value);
    }

    /// Set the call's result to a string, releasing any previous
    /// result.
    pub fn return_string(&mut self, value: &str) {
        self.result = Value::string(value);
    }

    fn into_result(self) -> Value {
        self.result
    }
}

/// The scope API: typed access to bindings from outside evaluation.
///
/// Reads consult the chain innermost-outward like any symbol lookup;
/// writes bind a fresh atom in the innermost frame.
pub struct ScopeApi<'a> {
    interp: &'a mut Interp,
}

impl ScopeApi<'_> {
    fn query(&self, symbol: &str) -> Result<Value, Error> {
        self.interp
            .scope
            .query(symbol)
            .ok_or_else(|| Error::Eval("scope query failed".to_string()))
    }

    pub fn get_integer(&self, symbol: &str) -> Result<i64, Error> {
        as_integer(&self.query(symbol)?)
    }

    pub fn get_real(&self, symbol: &str) -> Result<f64, Error> {
        as_real(&self.query(symbol)?)
    }

    pub fn get_string(&self, symbol: &str) -> Result<String, Error> {
        Ok(as_string(&self.query(symbol)?))
    }

    pub fn set_integer(&mut self, symbol: &str, value: i64) {
        self.interp.scope.set(symbol, Value::integer(value));
    }

    pub fn set_real(&mut self, symbol: &str, value: f64) {
        self.interp.scope.set(symbol, Value::real(value));
    }

    pub fn set_string(&mut self, symbol: &str, value: &str) {
        self.interp.scope.set(symbol, Value::string(value));
    }
}

impl Interp {
    /// Register a native function under a Lisp-visible name.
    ///
    /// Inside the callback, pull arguments and set the return value
    /// through the [`FuncApi`] handle. Returning an error from the
    /// callback surfaces it to `eval`'s caller unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use sclisp::{FuncApi, Interp};
    ///
    /// let mut interp = Interp::new();
    /// interp.register_user_func("double", |api: &mut FuncApi| {
    ///     let n = api.arg_integer(0)?;
    ///     api.return_integer(n * 2);
    ///     Ok(())
    /// });
    ///
    /// let result = interp.eval("(double 21)").unwrap();
    /// assert_eq!(result.to_string(), "42");
    /// ```
    pub fn register_user_func<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&mut FuncApi<'_>) -> Result<(), Error> + 'static,
    {
        let func = Rc::new(func);
        let wrapper = move |interp: &mut Interp, args: &Value| -> Result<Value, Error> {
            let mut api = FuncApi::new(interp, args.clone());
            func(&mut api)?;
            Ok(api.into_result())
        };
        let value = Value::builtin(Rc::new(wrapper));
        self.scope.set(name, value);
    }

    /// Rebind a registered name to nil, hiding the function. This is
    /// the unregistration path; the wrapped closure is released once
    /// no evaluation still holds it.
    pub fn unregister_user_func(&mut self, name: &str) {
        self.scope.set(name, Value::nil());
    }

    /// The scope API view over this instance.
    pub fn scope_api(&mut self) -> ScopeApi<'_> {
        ScopeApi { interp: self }
    }
}
