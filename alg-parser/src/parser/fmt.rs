//! Rendering of expression trees back to text.
//!
//! The rendering is a human-readable debug form, **not** a serialization format: binary nodes are
//! written as `<left> <op> <right>` with no parentheses, so the output does not encode the tree's
//! grouping. `(1 + 2) * 3` and `1 + 2 * 3` parse to different trees that render identically, and
//! the rendered text cannot in general be re-parsed into an equivalent tree.

use std::fmt;
use super::expr::{Binary, Expr};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Binary(Binary { op, lhs, rhs }) => write!(f, "{} {} {}", lhs, op, rhs),
        }
    }
}
