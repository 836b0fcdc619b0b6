use alg_parser::parser::expr::{Binary, Expr};

/// Builds a new tree with every occurrence of the variable `var` replaced by a constant.
///
/// The result is always a brand-new, fully independent tree: constants and non-matching
/// variables are cloned as-is, matching variables become fresh `Constant` nodes, and binary
/// nodes are rebuilt with both children substituted recursively.
pub fn substitute(expr: &Expr, var: &str, value: f64) -> Expr {
    match expr {
        Expr::Constant(c) => Expr::Constant(*c),
        Expr::Variable(name) => {
            if name == var {
                Expr::Constant(value)
            } else {
                Expr::Variable(name.clone())
            }
        },
        Expr::Binary(Binary { op, lhs, rhs }) => Expr::binary(
            *op,
            substitute(lhs, var, value),
            substitute(rhs, var, value),
        ),
    }
}

#[cfg(test)]
mod tests {
    use alg_parser::parser::parse;
    use assert_float_eq::*;
    use pretty_assertions::assert_eq;
    use super::*;
    use super::super::eval::eval;

    #[test]
    fn replaces_matching_variable() {
        let expr = parse("x + y").unwrap();
        let bound = substitute(&substitute(&expr, "x", 10.0), "y", 20.0);
        assert_float_absolute_eq!(eval(&bound, None), 30.0);
    }

    #[test]
    fn leaves_other_variables() {
        let expr = parse("x + y").unwrap();
        let bound = substitute(&expr, "x", 10.0);
        assert_eq!(bound, Expr::binary(
            alg_parser::parser::token::op::BinOpKind::Add,
            Expr::Constant(10.0),
            Expr::Variable("y".to_string()),
        ));
    }

    #[test]
    fn output_survives_dropping_input() {
        let expr = parse("a * a + 2").unwrap();
        let bound = substitute(&expr, "a", 3.0);
        drop(expr);
        assert_float_absolute_eq!(eval(&bound, None), 11.0);
    }

    #[test]
    fn named_constants_cannot_be_substituted() {
        // `pi` folded into a literal at parse time, so substituting "pi" changes nothing
        let expr = parse("pi * r").unwrap();
        let bound = substitute(&expr, "pi", 3.0);
        let with_r = substitute(&bound, "r", 1.0);
        assert_float_absolute_eq!(eval(&with_r, None), std::f64::consts::PI);
    }
}
