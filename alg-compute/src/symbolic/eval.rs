use alg_parser::parser::{expr::{Binary, Expr}, token::op::BinOpKind};

/// Evaluates the expression tree to a number.
///
/// Variables are resolved through `lookup`; with no lookup, any variable evaluates to NaN.
/// Division by an exactly-zero divisor evaluates to NaN. [`BinOpKind::Pow`] is supported even
/// though the parser never produces it, so trees constructed directly in code evaluate
/// consistently.
pub fn eval(expr: &Expr, lookup: Option<&dyn Fn(&str) -> f64>) -> f64 {
    match expr {
        Expr::Constant(value) => *value,
        Expr::Variable(name) => match lookup {
            Some(lookup) => lookup(name),
            None => f64::NAN,
        },
        Expr::Binary(Binary { op, lhs, rhs }) => {
            let a = eval(lhs, lookup);
            let b = eval(rhs, lookup);
            apply(*op, a, b)
        },
    }
}

/// Applies a binary operator to two numbers, with the division-by-zero convention shared by
/// every evaluator in this crate.
pub(crate) fn apply(op: BinOpKind, a: f64, b: f64) -> f64 {
    match op {
        BinOpKind::Add => a + b,
        BinOpKind::Sub => a - b,
        BinOpKind::Mul => a * b,
        BinOpKind::Div => {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        },
        BinOpKind::Pow => a.powf(b),
    }
}

#[cfg(test)]
mod tests {
    use alg_parser::parser::parse;
    use assert_float_eq::*;
    use super::*;

    fn lookup(name: &str) -> f64 {
        match name {
            "x" => 2.0,
            "y" => 3.0,
            _ => f64::NAN,
        }
    }

    #[test]
    fn constants_and_variables() {
        let expr = parse("x * y + 1").unwrap();
        assert_float_absolute_eq!(eval(&expr, Some(&lookup)), 7.0);
    }

    #[test]
    fn missing_lookup_is_nan() {
        let expr = parse("x + 1").unwrap();
        assert!(eval(&expr, None).is_nan());
    }

    #[test]
    fn unbound_variable_is_nan() {
        let expr = parse("z + 1").unwrap();
        assert!(eval(&expr, Some(&lookup)).is_nan());
    }

    #[test]
    fn division_by_zero_is_nan() {
        let expr = parse("1 / 0").unwrap();
        assert!(eval(&expr, None).is_nan());
    }

    #[test]
    fn named_constants_ignore_bindings() {
        // `pi` and `e` folded at parse time; a binding for "pi" must not shadow them
        let expr = parse("pi + e").unwrap();
        let expected = std::f64::consts::PI + std::f64::consts::E;
        assert_float_absolute_eq!(eval(&expr, None), expected);

        let shadow = |_: &str| 100.0;
        assert_float_absolute_eq!(eval(&expr, Some(&shadow)), expected);
    }

    #[test]
    fn pow_on_hand_built_trees() {
        // the grammar has no `^`, but a tree built in code must still evaluate
        let expr = Expr::binary(BinOpKind::Pow, Expr::Variable("x".to_string()), Expr::Constant(10.0));
        assert_float_absolute_eq!(eval(&expr, Some(&lookup)), 1024.0);
    }
}
