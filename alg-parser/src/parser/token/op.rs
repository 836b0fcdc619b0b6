//! The operator vocabulary shared by every consumer of expression trees.

use std::fmt;

/// The binary operation performed by a [`Binary`](crate::parser::expr::Binary) node.
///
/// The parser only ever produces the four arithmetic operators; [`BinOpKind::Pow`] exists for
/// trees constructed directly in code, and the evaluator in `alg-compute` supports it so that
/// hand-built trees behave consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOpKind {
    /// Returns the character this operator is written as.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
