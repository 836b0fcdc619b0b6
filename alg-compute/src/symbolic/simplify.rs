use alg_parser::parser::expr::{Binary, Expr};
use super::eval::apply;

/// Folds every fully-literal subtree into a single constant, depth-first and post-order.
///
/// This is the only rewriting `simplify` performs. A binary node whose children both fold to
/// constants becomes a constant computed with the usual evaluation rules, including the NaN
/// convention for division by a zero constant. Nothing else changes: no identity rules
/// (`x * 0`, `x + 0`), no reordering, no flattening.
///
/// The tree is taken by value and the folded tree is returned, so ownership of intermediate
/// nodes moves into the result and a caller can never hold a stale reference into a mutated
/// tree.
pub fn simplify(expr: Expr) -> Expr {
    match expr {
        Expr::Binary(binary) => {
            let lhs = simplify(*binary.lhs);
            let rhs = simplify(*binary.rhs);

            if let (Expr::Constant(a), Expr::Constant(b)) = (&lhs, &rhs) {
                return Expr::Constant(apply(binary.op, *a, *b));
            }

            Expr::Binary(Binary {
                op: binary.op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            })
        },
        leaf => leaf,
    }
}
