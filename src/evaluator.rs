//! The interpreter instance and the tree-walking evaluator.
//!
//! Evaluation is strictly synchronous recursion over the object tree:
//!
//! 1. nil evaluates to nil.
//! 2. Non-symbol atoms evaluate to themselves (a fresh reference).
//! 3. Symbols resolve through the scope chain, innermost frame first.
//! 4. For a cell, the head is evaluated; a function is applied through
//!    [`Interp::apply_function`], and a builtin receives the raw,
//!    unevaluated argument cdr - builtins evaluate their own arguments,
//!    which is the protocol special operators such as `quote`, `cond`,
//!    `and`, `or`, `lambda`, and `set` rely on.
//!
//! There is no depth limit and no cancellation; recursion is bounded by
//! the host stack.

use crate::builtins;
use crate::host::{Callbacks, Stream};
use crate::object::{Atom, Object, Statics, Value};
use crate::printer;
use crate::reader;
use crate::scope::{Frame, ScopeChain};
use crate::Error;

/// An interpreter instance: the callback table, the scope chain, the
/// per-instance static singletons, and the last result/error pair.
///
/// A single instance is not safe for concurrent use; separate instances
/// are fully independent.
pub struct Interp {
    pub(crate) cb: Callbacks,
    pub(crate) scope: ScopeChain,
    pub(crate) statics: Statics,
    last_result: Value,
    last_error: Option<Error>,
}

impl Interp {
    /// Build an instance around the platform default callbacks.
    pub fn new() -> Interp {
        Interp::with_callbacks(Callbacks::default())
    }

    /// Build an instance around a host-supplied callback table. The
    /// builtin library and the `#t`/`#f` constants are installed into
    /// the root frame before this returns.
    pub fn with_callbacks(cb: Callbacks) -> Interp {
        let mut interp = Interp {
            cb,
            scope: ScopeChain::new(),
            statics: Statics::new(),
            last_result: Value::nil(),
            last_error: None,
        };
        builtins::install(&mut interp);
        interp
    }

    /// Parse and evaluate the first expression in `source`.
    ///
    /// The previous last-result is released and replaced: by the new
    /// value on success, by nil on error. The error (if any) stays
    /// retrievable through [`Interp::errmsg`] until the next eval.
    ///
    /// ```
    /// let mut interp = sclisp::Interp::new();
    /// let v = interp.eval("(* (+ 1 2) 4)").unwrap();
    /// assert_eq!(v.to_string(), "12");
    /// ```
    pub fn eval(&mut self, source: &str) -> Result<Value, Error> {
        self.last_error = None;
        let result = reader::parse(source).and_then(|expr| self.eval_expr(&expr));
        match result {
            Ok(value) => {
                self.last_result = value.clone();
                Ok(value)
            }
            Err(err) => {
                self.last_result = Value::nil();
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Evaluate an already-read object tree in the current scope.
    pub fn eval_expr(&mut self, expr: &Value) -> Result<Value, Error> {
        let object = match expr.object() {
            None => return Ok(Value::nil()),
            Some(object) => object,
        };

        match object {
            Object::Cell(cell) => {
                let head = self.eval_expr(&cell.car)?;
                match head.object() {
                    Some(Object::Atom(Atom::Function(func))) => {
                        let params = func.params.clone();
                        let body = func.body.clone();
                        self.apply_function(&params, &cell.cdr, &body)
                    }
                    Some(Object::Atom(Atom::Builtin(builtin))) => {
                        let func = builtin.func.clone();
                        func(self, &cell.cdr)
                    }
                    Some(Object::Atom(_)) => Err(Error::BadArg(
                        "atomic operator is not executable".to_string(),
                    )),
                    _ => Err(Error::BadArg(
                        "non-atomic operator is not executable".to_string(),
                    )),
                }
            }
            Object::Atom(Atom::Symbol(name)) => self
                .scope
                .query(name)
                .ok_or_else(|| Error::Eval("scope query failed".to_string())),
            Object::Atom(_) => Ok(expr.clone()),
        }
    }

    /// Apply a function: evaluate the argument cells in the caller's
    /// scope, bind them pairwise to the parameters in a fresh innermost
    /// frame, run the body expressions in order, and return the value
    /// of the last one. The frame is popped on both exits.
    pub(crate) fn apply_function(
        &mut self,
        params: &Value,
        args: &Value,
        body: &Value,
    ) -> Result<Value, Error> {
        self.enter_scope_with(params, args)?;

        let mut result = Value::nil();
        for expr in body.elements() {
            result = match self.eval_expr(&expr) {
                Ok(value) => value,
                Err(err) => {
                    self.scope.pop();
                    return Err(err);
                }
            };
        }

        self.scope.pop();
        Ok(result)
    }

    /// Pair-wise bind parameters to evaluated arguments, then push the
    /// new frame. A leftover on either side is an arity error.
    fn enter_scope_with(&mut self, params: &Value, args: &Value) -> Result<(), Error> {
        let mut frame = Frame::new();
        let mut param = params.clone();
        let mut arg = args.clone();

        while !param.is_nil() && !arg.is_nil() {
            let name = param.car();
            let symbol = match name.symbol_name() {
                Some(symbol) => symbol.to_string(),
                None => {
                    return Err(Error::Bug(
                        "requested binding to non-symbol".to_string(),
                    ))
                }
            };
            let value = self.eval_expr(&arg.car())?;
            frame.bind(symbol, value);
            param = param.cdr();
            arg = arg.cdr();
        }

        if !param.is_nil() || !arg.is_nil() {
            return Err(Error::BadArg(
                "function called with wrong number of arguments".to_string(),
            ));
        }

        self.scope.push(frame);
        Ok(())
    }

    /// The value of the most recent top-level eval (nil after an
    /// error).
    pub fn last_result(&self) -> &Value {
        &self.last_result
    }

    /// The error of the most recent top-level eval, if it failed.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// The last error's message, if one was recorded.
    pub fn errmsg(&self) -> Option<&str> {
        self.last_error.as_ref().and_then(|err| err.message())
    }

    /// Render the last result through the print callback, followed by
    /// a newline.
    pub fn repr(&mut self) {
        let text = printer::repr(&self.last_result);
        self.cb.print(Stream::Stdout, &format!("{text}\n"));
    }

    #[cfg(test)]
    pub(crate) fn scope_depth(&self) -> usize {
        self.scope.depth()
    }
}

impl Default for Interp {
    fn default() -> Self {
        Interp::new()
    }
}
