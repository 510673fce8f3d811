//! The lexer: source text to a linear token stream.
//!
//! Tokens are separated by whitespace; `(`, `)`, and `'` stand alone;
//! `"` delimits string literals whose content is taken verbatim (no
//! escape processing). Any other run of characters is a word, tried as
//! an integer (with `0x` hex and leading-`0` octal prefixes), then a
//! real, then the literal `nil`, and otherwise taken as a symbol.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, take_while1},
    character::complete::char,
    combinator::{map, opt, value},
    sequence::delimited,
};

use crate::{Error, TOKEN_MAX};

/// One lexed token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Quote,
    Integer(i64),
    Real(f64),
    Str(String),
    Symbol(String),
    Nil,
}

/// A token before word classification, borrowing from the source.
#[derive(Debug, Clone, PartialEq)]
enum RawToken<'a> {
    LParen,
    RParen,
    Quote,
    Str(&'a str),
    Word(&'a str),
}

/// Characters that terminate a word.
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | '\'' | '"')
}

fn string_literal(input: &str) -> IResult<&str, RawToken<'_>> {
    map(
        delimited(char('"'), opt(is_not("\"")), char('"')),
        |content: Option<&str>| RawToken::Str(content.unwrap_or("")),
    )
    .parse(input)
}

fn word(input: &str) -> IResult<&str, RawToken<'_>> {
    map(take_while1(is_word_char), RawToken::Word).parse(input)
}

fn raw_token(input: &str) -> IResult<&str, RawToken<'_>> {
    alt((
        value(RawToken::LParen, char('(')),
        value(RawToken::RParen, char(')')),
        value(RawToken::Quote, char('\'')),
        string_literal,
        word,
    ))
    .parse(input)
}

/// Scan a word as an integer the way a base-0 `strtol` would: optional
/// sign, then `0x`/`0X` hex, leading-`0` octal, or decimal. The whole
/// word must be consumed.
pub(crate) fn scan_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() {
        return None;
    }

    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    if digits.is_empty() {
        return None;
    }

    if negative {
        i64::from_str_radix(&format!("-{digits}"), radix).ok()
    } else {
        i64::from_str_radix(digits, radix).ok()
    }
}

/// Scan a word as a real. The whole word must be consumed.
pub(crate) fn scan_real(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

fn classify_word(word: &str) -> Token {
    if let Some(integer) = scan_integer(word) {
        Token::Integer(integer)
    } else if let Some(real) = scan_real(word) {
        Token::Real(real)
    } else if word == "nil" {
        Token::Nil
    } else {
        Token::Symbol(word.to_string())
    }
}

fn check_len(text: &str) -> Result<(), Error> {
    if text.len() > TOKEN_MAX {
        Err(Error::Overflow(
            "token length exceeds buffer size".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Convert a source string to its token stream.
pub fn lex(source: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut input = source.trim_start();

    while !input.is_empty() {
        let (rest, raw) = match raw_token(input) {
            Ok(parsed) => parsed,
            Err(_) => {
                // The only way every alternative can fail on non-empty
                // input is a string literal with no closing quote.
                if input.starts_with('"') {
                    return Err(Error::BadArg("unterminated string literal".to_string()));
                }
                return Err(Error::Bug("lexer failed to advance".to_string()));
            }
        };

        let token = match raw {
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::Quote => Token::Quote,
            RawToken::Str(content) => {
                check_len(content)?;
                Token::Str(content.to_string())
            }
            RawToken::Word(text) => {
                check_len(text)?;
                classify_word(text)
            }
        };

        tokens.push(token);
        input = rest.trim_start();
    }

    Ok(tokens)
}
