use crate::{consts, tokenizer::TokenKind};
use super::{
    error::{kind, Error},
    literal::{LitNum, LitSym},
    token::{op::BinOpKind, Add, CloseParen, Div, Mul, OpenParen, Sub},
    Parse,
    Parser,
    MAX_NESTING_DEPTH,
};

/// The maximum length of a variable name, in bytes. Longer names are truncated by the parser, not
/// rejected.
pub const MAX_NAME_LEN: usize = 31;

/// A symbolic arithmetic expression.
///
/// An expression is a binary tree: constants and variables are the leaves, and each binary
/// operator owns exactly two subtrees. `Box` ownership means a tree can never contain cycles or
/// share nodes between branches; cloning an expression is always a deep copy, and dropping it
/// frees every node exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value, such as `2.5` or a folded named constant like `pi`.
    Constant(f64),

    /// A named variable, such as `x`, resolved only at evaluation time.
    Variable(String),

    /// A binary operation applied to two subtrees.
    Binary(Binary),
}

/// A binary operation node, such as `1 + 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The operator of the binary expression.
    pub op: BinOpKind,

    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,
}

impl Expr {
    /// Creates a binary operation node from its operator and operands.
    pub fn binary(op: BinOpKind, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }
}

impl Parse for Expr {
    /// `expr = term { ('+' | '-') term }`
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.clone().try_parse::<CloseParen>().is_ok() {
            return Err(input.error(kind::UnclosedParenthesis { opening: false }));
        }

        let mut lhs = parse_term(input)?;

        loop {
            let op = if input.try_parse::<Add>().is_ok() {
                BinOpKind::Add
            } else if input.try_parse::<Sub>().is_ok() {
                BinOpKind::Sub
            } else {
                break;
            };

            let rhs = parse_term(input)?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }
}

/// `term = factor { ('*' | '/') factor }`
fn parse_term(input: &mut Parser) -> Result<Expr, Error> {
    let mut lhs = parse_factor(input)?;

    loop {
        let op = if input.try_parse::<Mul>().is_ok() {
            BinOpKind::Mul
        } else if input.try_parse::<Div>().is_ok() {
            BinOpKind::Div
        } else {
            break;
        };

        let rhs = parse_factor(input)?;
        lhs = Expr::binary(op, lhs, rhs);
    }

    Ok(lhs)
}

/// `factor = number | known_constant | identifier | '(' expr ')'`
fn parse_factor(input: &mut Parser) -> Result<Expr, Error> {
    if let Ok(num) = input.try_parse::<LitNum>() {
        return Ok(Expr::Constant(num.value));
    }

    if let Ok(sym) = input.try_parse::<LitSym>() {
        // named constants fold immediately and can never come back as variables
        if let Some(value) = consts::lookup(&sym.name) {
            return Ok(Expr::Constant(value));
        }

        if sym.name.contains('_') {
            return Err(Error::new(sym.span, kind::InvalidVariableName));
        }

        let mut name = sym.name;
        name.truncate(MAX_NAME_LEN);
        return Ok(Expr::Variable(name));
    }

    parse_paren(input)
}

/// `'(' expr ')'`, the last alternative of `factor`.
fn parse_paren(input: &mut Parser) -> Result<Expr, Error> {
    let open = input.try_parse::<OpenParen>().map_err(|err| {
        // none of the factor alternatives matched; report all of them
        match input.clone().next_token() {
            Ok(token) => Error::new(token.span, kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name, TokenKind::OpenParen],
                found: token.kind,
            }),
            Err(_) => err,
        }
    })?;

    if input.paren_depth >= MAX_NESTING_DEPTH {
        return Err(Error::new(open.span, kind::NestingTooDeep));
    }

    input.paren_depth += 1;
    let result = parse_paren_body(input, &open);
    input.paren_depth -= 1;
    result
}

fn parse_paren_body(input: &mut Parser, open: &OpenParen) -> Result<Expr, Error> {
    if let Ok(close) = input.try_parse::<CloseParen>() {
        return Err(Error::new(open.span.start..close.span.end, kind::EmptyParenthesis));
    }

    let expr = input.try_parse::<Expr>()?;

    if input.try_parse::<CloseParen>().is_ok() {
        Ok(expr)
    } else {
        Err(Error::new(open.span.clone(), kind::UnclosedParenthesis { opening: true }))
    }
}
