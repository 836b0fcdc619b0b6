//! The recursive-descent parser for symbolic expressions.
//!
//! The grammar, lowest to highest precedence, with every operator left-associative:
//!
//! ```text
//! expr   = term { ('+' | '-') term } ;
//! term   = factor { ('*' | '/') factor } ;
//! factor = number | known_constant | identifier | '(' expr ')' ;
//! ```
//!
//! There are no unary operators and no exponentiation operator; `^` in the input is a parse
//! error. Named constants (see [`crate::consts`]) fold into [`Expr::Constant`] nodes during
//! parsing. Parsing never returns a partial tree: unconsumed trailing input, an unmatched
//! parenthesis, or a malformed factor all produce an [`Error`](error::Error) pointing at the
//! offending position.

pub mod error;
pub mod expr;
mod fmt;
pub mod literal;
pub mod token;

use alg_error::ErrorKind;
use error::{kind, Error};
use expr::Expr;
use crate::tokenizer::{tokenize_complete, Token};
use std::ops::Range;

/// The maximum depth of nested parentheses. Recursion depth while parsing (and later while
/// walking a parsed tree) is proportional to nesting depth, so it is capped instead of letting
/// pathological input exhaust the call stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A high-level parser for symbolic expressions. This is the type to use to parse an arbitrary
/// piece of text into an expression tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The current depth of nested parentheses.
    pub(crate) paren_depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            paren_depth: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(self.span(), kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value, backtracking the cursor position if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;

        while let Some(token) = self.tokens.get(self.cursor) {
            if token.is_whitespace() {
                self.cursor += 1;
            } else {
                break;
            }
        }

        if self.cursor == self.tokens.len() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// Parses the given source into an expression tree, requiring all input to be consumed.
pub fn parse(source: &str) -> Result<Expr, Error> {
    let mut parser = Parser::new(source);
    parser.try_parse_full::<Expr>()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use expr::{Expr, MAX_NAME_LEN};
    use token::op::BinOpKind;

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), Expr::Constant(16.0));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14").unwrap(), Expr::Constant(3.14));
    }

    #[test]
    fn literal_leading_dot() {
        assert_eq!(parse(".5").unwrap(), Expr::Constant(0.5));
    }

    #[test]
    fn literal_variable() {
        assert_eq!(parse("velocity").unwrap(), Expr::Variable("velocity".to_string()));
    }

    #[test]
    fn named_constants_fold() {
        assert_eq!(parse("pi").unwrap(), Expr::Constant(std::f64::consts::PI));
        assert_eq!(parse("two_pi").unwrap(), Expr::Constant(2.0 * std::f64::consts::PI));
    }

    #[test]
    fn constant_prefix_is_a_variable() {
        // `pix` must not match the `pi` constant
        assert_eq!(parse("pix").unwrap(), Expr::Variable("pix".to_string()));
    }

    #[test]
    fn binary_left_associativity() {
        assert_eq!(parse("3 - 2 - 1").unwrap(), Expr::binary(
            BinOpKind::Sub,
            Expr::binary(BinOpKind::Sub, Expr::Constant(3.0), Expr::Constant(2.0)),
            Expr::Constant(1.0),
        ));
    }

    #[test]
    fn binary_mixed_precedence() {
        assert_eq!(parse("3 + 4 * a").unwrap(), Expr::binary(
            BinOpKind::Add,
            Expr::Constant(3.0),
            Expr::binary(BinOpKind::Mul, Expr::Constant(4.0), Expr::Variable("a".to_string())),
        ));
    }

    #[test]
    fn binary_complicated() {
        // 1 + 2 * 3 - 4 / x  =>  (1 + (2 * 3)) - (4 / x)
        assert_eq!(parse("1 + 2 * 3 - 4 / x").unwrap(), Expr::binary(
            BinOpKind::Sub,
            Expr::binary(
                BinOpKind::Add,
                Expr::Constant(1.0),
                Expr::binary(BinOpKind::Mul, Expr::Constant(2.0), Expr::Constant(3.0)),
            ),
            Expr::binary(BinOpKind::Div, Expr::Constant(4.0), Expr::Variable("x".to_string())),
        ));
    }

    #[test]
    fn parenthesized_grouping() {
        assert_eq!(parse("(3 + 4) * a").unwrap(), Expr::binary(
            BinOpKind::Mul,
            Expr::binary(BinOpKind::Add, Expr::Constant(3.0), Expr::Constant(4.0)),
            Expr::Variable("a".to_string()),
        ));
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(parse("  1+ \t2 ").unwrap(), Expr::binary(
            BinOpKind::Add,
            Expr::Constant(1.0),
            Expr::Constant(2.0),
        ));
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "a".repeat(MAX_NAME_LEN + 9);
        let expected = "a".repeat(MAX_NAME_LEN);
        assert_eq!(parse(&name).unwrap(), Expr::Variable(expected));
    }

    #[test]
    fn rejects_trailing_operator() {
        assert!(parse("2 +").is_err());
    }

    #[test]
    fn rejects_caret() {
        // `^` is not part of the grammar; this must not silently parse as `x`
        assert!(parse("x ^ 2").is_err());
    }

    #[test]
    fn rejects_trailing_input() {
        assert!(parse("2 3").is_err());
        assert!(parse("1 + 2 )").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn rejects_unmatched_parentheses() {
        assert!(parse("(1 + 2").is_err());
        assert!(parse(")").is_err());
        assert!(parse("()").is_err());
    }

    #[test]
    fn rejects_doubled_operator() {
        assert!(parse("1 / / 2").is_err());
    }

    #[test]
    fn rejects_underscore_in_variable() {
        assert!(parse("a_b").is_err());
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let ok = format!("{}1{}", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
        assert!(parse(&ok).is_ok());

        let too_deep = format!(
            "{}1{}",
            "(".repeat(MAX_NESTING_DEPTH + 1),
            ")".repeat(MAX_NESTING_DEPTH + 1),
        );
        assert!(parse(&too_deep).is_err());
    }
}
