//! Rewrites and evaluation of symbolic expression trees.
//!
//! Every operation here walks the [`Expr`](alg_parser::parser::expr::Expr) tree produced by
//! `alg-parser`:
//!
//! - [`eval()`] computes the numeric value of a tree against a caller-supplied variable lookup.
//!   Evaluation anomalies (an unbound variable, division by zero) surface as NaN rather than
//!   errors, so partially-bound environments are usable.
//! - [`simplify()`] folds fully-literal subtrees into constants. It performs no other algebraic
//!   rewriting: `x * 0` stays `x * 0`.
//! - [`derivative()`] builds the symbolic derivative with respect to one variable. The output
//!   tree is entirely fresh; wherever a rule reuses an operand (the product and quotient rules),
//!   the operand is deep-cloned, so input and output never share nodes.
//! - [`substitute()`] replaces a variable with a constant, also producing an independent tree.
//!
//! All traversals are recursive and synchronous; recursion depth equals tree depth, which the
//! parser caps at [`MAX_NESTING_DEPTH`](alg_parser::parser::MAX_NESTING_DEPTH) levels of
//! grouping. Trees built by hand are not depth-checked.

pub mod derivative;
pub mod eval;
pub mod simplify;
pub mod substitute;

pub use derivative::{derivative, DerivativeError};
pub use eval::eval;
pub use simplify::simplify;
pub use substitute::substitute;
