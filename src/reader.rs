//! The reader: token stream to object tree.
//!
//! `(e1 e2 ... en)` builds a proper list, `()` and the `nil` token are
//! the empty reference, and `'e` is rewritten to `(quote e)`. A bare
//! atom at the top level is returned directly. Only the first complete
//! expression of the input is read; whatever follows is ignored, which
//! doubles as a trailing-comment mechanism.

use crate::lexer::{self, Token};
use crate::object::Value;
use crate::Error;

/// Lex and read the first expression of `source`. Empty input reads as
/// nil.
pub fn parse(source: &str) -> Result<Value, Error> {
    let tokens = lexer::lex(source)?;
    read_first(&tokens)
}

/// Read the first expression from a token stream, ignoring trailing
/// tokens.
pub fn read_first(tokens: &[Token]) -> Result<Value, Error> {
    let mut rest = tokens;
    if rest.is_empty() {
        return Ok(Value::nil());
    }
    read_expr(&mut rest)
}

fn read_expr(tokens: &mut &[Token]) -> Result<Value, Error> {
    let (first, rest) = match tokens.split_first() {
        Some(split) => split,
        None => return Err(Error::BadArg("expected an expression".to_string())),
    };
    *tokens = rest;

    match first {
        Token::Integer(i) => Ok(Value::integer(*i)),
        Token::Real(r) => Ok(Value::real(*r)),
        Token::Str(s) => Ok(Value::string(s.clone())),
        Token::Symbol(s) => Ok(Value::symbol(s.clone())),
        Token::Nil => Ok(Value::nil()),
        Token::LParen => read_list(tokens),
        Token::RParen => Err(Error::BadArg("unbalanced ')'".to_string())),
        Token::Quote => {
            if tokens.is_empty() {
                return Err(Error::BadArg("quote needs an expression".to_string()));
            }
            let inner = read_expr(tokens)?;
            Ok(Value::list([Value::symbol("quote"), inner]))
        }
    }
}

fn read_list(tokens: &mut &[Token]) -> Result<Value, Error> {
    let mut elements = Vec::new();
    loop {
        match tokens.first() {
            None => return Err(Error::BadArg("unterminated list".to_string())),
            Some(Token::RParen) => {
                *tokens = &tokens[1..];
                break;
            }
            Some(_) => elements.push(read_expr(tokens)?),
        }
    }
    Ok(Value::list(elements))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Value {
        Value::symbol(s)
    }

    #[test]
    fn bare_atoms_read_directly() {
        assert_eq!(parse("42").unwrap(), Value::integer(42));
        assert_eq!(parse("2.5").unwrap(), Value::real(2.5));
        assert_eq!(parse("\"hi\"").unwrap(), Value::string("hi"));
        assert_eq!(parse("foo").unwrap(), sym("foo"));
        assert!(parse("nil").unwrap().is_nil());
    }

    #[test]
    fn empty_input_reads_as_nil() {
        assert!(parse("").unwrap().is_nil());
        assert!(parse("   ").unwrap().is_nil());
    }

    #[test]
    fn lists_are_right_nested_cells() {
        let parsed = parse("(a b c)").unwrap();
        assert_eq!(parsed, Value::list([sym("a"), sym("b"), sym("c")]));
    }

    #[test]
    fn empty_parens_read_as_nil() {
        assert!(parse("()").unwrap().is_nil());
    }

    #[test]
    fn nested_lists() {
        let parsed = parse("(a (b (c)) d)").unwrap();
        assert_eq!(
            parsed,
            Value::list([
                sym("a"),
                Value::list([sym("b"), Value::list([sym("c")])]),
                sym("d"),
            ])
        );
    }

    #[test]
    fn quote_sugar_wraps_the_expression() {
        assert_eq!(
            parse("'x").unwrap(),
            Value::list([sym("quote"), sym("x")])
        );
        assert_eq!(
            parse("'(1 2)").unwrap(),
            Value::list([
                sym("quote"),
                Value::list([Value::integer(1), Value::integer(2)]),
            ])
        );
    }

    #[test]
    fn nested_quotes_wrap_repeatedly() {
        assert_eq!(
            parse("''x").unwrap(),
            Value::list([
                sym("quote"),
                Value::list([sym("quote"), sym("x")]),
            ])
        );
    }

    #[test]
    fn quote_inside_a_list() {
        assert_eq!(
            parse("(a 'b)").unwrap(),
            Value::list([sym("a"), Value::list([sym("quote"), sym("b")])])
        );
    }

    #[test]
    fn only_the_first_expression_is_read() {
        assert_eq!(parse("1 2 3").unwrap(), Value::integer(1));
        assert_eq!(
            parse("(+ 1 2) this trailing text is ignored").unwrap(),
            Value::list([sym("+"), Value::integer(1), Value::integer(2)])
        );
    }

    #[test]
    fn unbalanced_right_paren_is_rejected() {
        assert_eq!(
            parse(")").unwrap_err(),
            Error::BadArg("unbalanced ')'".to_string())
        );
    }

    #[test]
    fn unterminated_group_is_rejected() {
        assert_eq!(
            parse("(1 2").unwrap_err(),
            Error::BadArg("unterminated list".to_string())
        );
        assert_eq!(
            parse("(1 (2 3)").unwrap_err(),
            Error::BadArg("unterminated list".to_string())
        );
    }

    #[test]
    fn dangling_quote_is_rejected() {
        assert_eq!(
            parse("'").unwrap_err(),
            Error::BadArg("quote needs an expression".to_string())
        );
    }
}
