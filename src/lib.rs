//! SCLisp - an embeddable interpreter for a small Lisp dialect.
//!
//! The interpreter is meant to be linked into a host program: the host
//! injects a callback table for output and character input, registers
//! native functions, and then hands the interpreter source expressions
//! to evaluate.
//!
//! ```lisp
//! (+ 1 2 3)                        ; arithmetic with promotion
//! (set (square x) (* x x))         ; function definition sugar
//! (cond ((nil? l) "empty") (#t "not empty"))
//! '(a b c)                         ; quote sugar
//! ```
//!
//! Evaluating from Rust:
//!
//! ```
//! use sclisp::Interp;
//!
//! let mut interp = Interp::new();
//! interp.eval("(set (square x) (* x x))").unwrap();
//! let result = interp.eval("(square 7)").unwrap();
//! assert_eq!(result.to_string(), "49");
//! ```
//!
//! ## Semantics in brief
//!
//! - Everything is an object: an atom (integer, real, string, symbol,
//!   function, builtin) or a cell. `nil` is simultaneously the empty
//!   list, boolean false, and the absent value.
//! - Builtins receive their argument cells **unevaluated** and decide
//!   themselves what to evaluate. This is how `quote`, `cond`, `and`,
//!   `or`, `lambda`, and `set` get special-operator behavior without a
//!   separate special-form category.
//! - Lambdas are dynamically scoped: arguments are evaluated in the
//!   caller's scope and bound in a fresh frame whose parent is the
//!   caller's frame, not the definition site's.
//!
//! ## Modules
//!
//! - `host`: the injected callback table and stream identifiers
//! - `object`: the tagged object model and `Value` handle
//! - `lexer` / `reader`: source text to token stream to object tree
//! - `scope`: the frame chain
//! - `evaluator`: the interpreter instance and eval dispatch
//! - `builtins`: the primitive operator library
//! - `printer`: the canonical renderer (`repr`)
//! - `bridge`: the embedder-facing function and scope APIs

use std::fmt;

pub mod bridge;
pub mod builtins;
pub mod evaluator;
pub mod host;
pub mod lexer;
pub mod object;
pub mod printer;
pub mod reader;
pub mod scope;

pub use bridge::{FuncApi, ScopeApi};
pub use evaluator::Interp;
pub use host::{Callbacks, Stream};
pub use object::{Atom, Cell, Object, Value};

/// Textual library version.
pub const VERSION: &str = "0.2.2";

/// Packed integer version: major * 1_000_000 + minor * 1_000 + revision.
pub const VERSION_NUMBER: u64 = 2_002;

/// Maximum length of a single token in bytes. Longer tokens report
/// [`Error::Overflow`].
pub const TOKEN_MAX: usize = 127;

/// Output budget of the canonical renderer in bytes. Longer renderings
/// are silently truncated.
pub const REPR_MAX: usize = 1023;

/// Error values carried by every fallible interpreter operation.
///
/// Each variant maps to one of the stable integer codes of the
/// interpreter's external contract; see [`Error::code`] and
/// [`error_name`]. Success has no variant - it is the absence of an
/// error - and corresponds to code 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Generic failure: a failed scope lookup, a nil argument where a
    /// value is required, or any native callback's catch-all error.
    Eval(String),
    /// The host allocator refused a request. Unreachable with Rust's
    /// infallible allocation, but kept so the full stable code alphabet
    /// is representable.
    NoMem,
    /// Malformed expression or argument: wrong count, wrong type,
    /// divide by zero, unbalanced parse.
    BadArg(String),
    /// Operation unavailable in this build or with this callback table.
    Unsupported(String),
    /// A fixed limit was exceeded (token buffer, integer range).
    Overflow(String),
    /// Internal invariant violation. Seeing this is a bug in the
    /// interpreter, not in the evaluated program.
    Bug(String),
}

impl Error {
    /// The stable integer code for this error.
    pub fn code(&self) -> i64 {
        match self {
            Error::Eval(_) => 1,
            Error::NoMem => 2,
            Error::BadArg(_) => 3,
            Error::Unsupported(_) => 4,
            Error::Overflow(_) => 5,
            Error::Bug(_) => 0xBADB01,
        }
    }

    /// The message carried by this error, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::NoMem => None,
            Error::Eval(m)
            | Error::BadArg(m)
            | Error::Unsupported(m)
            | Error::Overflow(m)
            | Error::Bug(m) => Some(m.as_str()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Eval(m) => write!(f, "error: {m}"),
            Error::NoMem => write!(f, "out of memory"),
            Error::BadArg(m) => write!(f, "bad argument: {m}"),
            Error::Unsupported(m) => write!(f, "unsupported: {m}"),
            Error::Overflow(m) => write!(f, "overflow: {m}"),
            Error::Bug(m) => write!(f, "internal bug: {m}"),
        }
    }
}

impl std::error::Error for Error {}

/// Static human-readable name for a stable error code, or `None` for a
/// code outside the alphabet.
pub fn error_name(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("SCLISP_OK"),
        1 => Some("SCLISP_ERR"),
        2 => Some("SCLISP_NOMEM"),
        3 => Some("SCLISP_BADARG"),
        4 => Some("SCLISP_UNSUPPORTED"),
        5 => Some("SCLISP_OVERFLOW"),
        0xBADB01 => Some("SCLISP_BUG"),
        _ => None,
    }
}
