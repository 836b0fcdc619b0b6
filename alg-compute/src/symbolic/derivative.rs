use alg_parser::parser::{expr::{Binary, Expr}, token::op::BinOpKind};
use std::fmt;

/// The derivative could not be symbolically computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeError {
    /// The tree contains an operator with no differentiation rule.
    UnsupportedOperator(BinOpKind),
}

impl fmt::Display for DerivativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOperator(op) => {
                write!(f, "no differentiation rule for the `{}` operator", op)
            },
        }
    }
}

impl std::error::Error for DerivativeError {}

/// Computes the symbolic derivative of the expression with respect to `var`.
///
/// Rules:
///
/// - `c' = 0`, `x' = 1` (for the variable being differentiated), `y' = 0` (for any other)
/// - `(u + v)' = u' + v'` and `(u - v)' = u' - v'`
/// - `(u * v)' = u'v + uv'`
/// - `(u / v)' = (u'v - uv') / v^2` (the square written as `v * v`)
///
/// [`BinOpKind::Pow`] has no rule and returns an error rather than a guess. Wherever a rule
/// reuses an operand, the operand subtree is cloned, so the returned tree shares no nodes with
/// the input or with itself and both trees can be dropped independently.
pub fn derivative(expr: &Expr, var: &str) -> Result<Expr, DerivativeError> {
    match expr {
        Expr::Constant(_) => Ok(Expr::Constant(0.0)),
        Expr::Variable(name) => {
            Ok(Expr::Constant(if name == var { 1.0 } else { 0.0 }))
        },
        Expr::Binary(Binary { op, lhs: u, rhs: v }) => {
            let du = derivative(u, var)?;
            let dv = derivative(v, var)?;

            match op {
                BinOpKind::Add => Ok(Expr::binary(BinOpKind::Add, du, dv)),
                BinOpKind::Sub => Ok(Expr::binary(BinOpKind::Sub, du, dv)),
                BinOpKind::Mul => Ok(Expr::binary(
                    BinOpKind::Add,
                    Expr::binary(BinOpKind::Mul, du, (**v).clone()),
                    Expr::binary(BinOpKind::Mul, (**u).clone(), dv),
                )),
                BinOpKind::Div => {
                    let numerator = Expr::binary(
                        BinOpKind::Sub,
                        Expr::binary(BinOpKind::Mul, du, (**v).clone()),
                        Expr::binary(BinOpKind::Mul, (**u).clone(), dv),
                    );
                    let denominator = Expr::binary(
                        BinOpKind::Mul,
                        (**v).clone(),
                        (**v).clone(),
                    );
                    Ok(Expr::binary(BinOpKind::Div, numerator, denominator))
                },
                BinOpKind::Pow => Err(DerivativeError::UnsupportedOperator(*op)),
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use alg_parser::parser::parse;
    use assert_float_eq::*;
    use super::*;
    use super::super::eval::eval;

    /// Evaluates an expression with `x` bound to the given value.
    fn eval_x(expr: &Expr, x: f64) -> f64 {
        eval(expr, Some(&move |name: &str| if name == "x" { x } else { f64::NAN }))
    }

    /// Approximates the derivative of the expression at `x` with a central difference.
    fn finite_difference(expr: &Expr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(expr, x + DX) - eval_x(expr, x - DX)) / (2.0 * DX)
    }

    /// Checks the symbolic derivative of `source` against finite differences at several points.
    fn check_against_finite_difference(source: &str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 1e-4;

        let expr = parse(source).unwrap();
        let deriv = derivative(&expr, "x").unwrap();

        for point in points {
            let symbolic = eval_x(&deriv, point);
            let numeric = finite_difference(&expr, point);
            assert!(
                (symbolic - numeric).abs() < TOL,
                "for `{}` at x={}: symbolic derivative {} differs from numeric {}",
                source, point, symbolic, numeric,
            );
        }
    }

    #[test]
    fn constant_rule() {
        let deriv = derivative(&parse("7").unwrap(), "x").unwrap();
        assert_eq!(deriv, Expr::Constant(0.0));
    }

    #[test]
    fn variable_rule() {
        assert_eq!(derivative(&parse("x").unwrap(), "x").unwrap(), Expr::Constant(1.0));
        assert_eq!(derivative(&parse("y").unwrap(), "x").unwrap(), Expr::Constant(0.0));
    }

    #[test]
    fn sum_rule_is_linear() {
        // (x + 3)' = 1 at any point
        let deriv = derivative(&parse("x + 3").unwrap(), "x").unwrap();
        for point in [0.0, 1.0, -17.5] {
            assert_float_absolute_eq!(eval_x(&deriv, point), 1.0);
        }
    }

    #[test]
    fn product_rule() {
        // d/dx (x * y) = y
        let expr = parse("x * y").unwrap();
        let deriv = derivative(&expr, "x").unwrap();
        let bindings = |name: &str| match name {
            "x" => 2.0,
            "y" => 5.0,
            _ => f64::NAN,
        };
        assert_float_absolute_eq!(eval(&deriv, Some(&bindings)), 5.0);
    }

    #[test]
    fn quotient_rule_matches_finite_difference() {
        check_against_finite_difference("1 / x", [0.5, 1.0, 2.0, 8.0]);
        check_against_finite_difference("(x * x - 1) / (x + 2)", [0.0, 1.0, 3.0]);
    }

    #[test]
    fn polynomial_matches_finite_difference() {
        check_against_finite_difference("x * x + 5 * x + 6", [0.0, 1.0, 2.0, 5.0, 8.0]);
    }

    #[test]
    fn pow_is_unsupported() {
        let expr = Expr::binary(BinOpKind::Pow, Expr::Variable("x".to_string()), Expr::Constant(2.0));
        assert_eq!(
            derivative(&expr, "x"),
            Err(DerivativeError::UnsupportedOperator(BinOpKind::Pow)),
        );
    }

    #[test]
    fn output_is_independent_of_input() {
        let expr = parse("x / (y + 1)").unwrap();
        let original = expr.clone();

        let deriv = derivative(&expr, "x").unwrap();
        drop(deriv);

        // dropping the derivative must leave the input tree intact
        assert_eq!(expr, original);
    }
}
