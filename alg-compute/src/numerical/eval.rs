//! The shunting-yard evaluator.

use alg_error::Error;
use alg_parser::parser::token::op::BinOpKind;
use crate::symbolic::eval::apply;
use std::ops::Range;
use super::ctxt::Ctxt;
use super::error;
use super::token::{tokenize_complete, TokenKind};

/// An entry on the operator stack.
enum StackEntry {
    /// A pending binary operator.
    Op { op: BinOpKind },

    /// A plain grouping parenthesis.
    Paren { span: Range<usize> },

    /// A function call frame, opened by `name(` and closed at the matching `)`. `args` counts
    /// the commas seen so far.
    Call { name: String, span: Range<usize>, args: usize },
}

fn precedence(op: BinOpKind) -> u8 {
    match op {
        BinOpKind::Add | BinOpKind::Sub => 1,
        BinOpKind::Mul | BinOpKind::Div => 2,
        BinOpKind::Pow => 3,
    }
}

fn is_right_associative(op: BinOpKind) -> bool {
    matches!(op, BinOpKind::Pow)
}

fn apply_op(op: BinOpKind, output: &mut Vec<f64>) {
    // the operand/operator state machine guarantees two values are present
    let b = output.pop().unwrap();
    let a = output.pop().unwrap();
    output.push(apply(op, a, b));
}

fn apply_call(
    ctxt: &Ctxt,
    name: &str,
    span: Range<usize>,
    given: usize,
    output: &mut Vec<f64>,
) -> Result<(), Error> {
    let Some(func) = ctxt.get_func(name) else {
        return Err(Error::new(vec![span], error::UndefinedFunction {
            name: name.to_owned(),
            suggestions: ctxt.get_similar_funcs(name),
        }));
    };

    if func.arity() != given {
        return Err(Error::new(vec![span], error::WrongNumberOfArguments {
            name: name.to_owned(),
            expected: func.arity(),
            given,
        }));
    }

    let args = output.split_off(output.len() - given);
    output.push(func.call(&args));
    Ok(())
}

/// Evaluates infix text straight to a number, resolving variables and functions through the
/// given context.
///
/// The accepted operators are `+ - * /` and `^` (right-associative, binding tighter than `*` and
/// `/`); there are no unary operators, so a leading `-` is an error and negation is written
/// `0 - x`. Function calls are `name(arg, ...)`, with the argument count checked against the
/// registered arity. Division by an exactly-zero divisor follows the library-wide convention and
/// evaluates to NaN rather than failing.
pub fn eval(source: &str, ctxt: &Ctxt) -> Result<f64, Error> {
    let tokens = tokenize_complete(source);
    let mut tokens = tokens.iter().filter(|t| !t.is_whitespace()).peekable();

    let mut stack: Vec<StackEntry> = Vec::new();
    let mut output: Vec<f64> = Vec::new();
    let mut expect_operand = true;

    if tokens.peek().is_none() {
        return Err(Error::new(vec![0..source.len()], error::EmptyExpression));
    }

    while let Some(token) = tokens.next() {
        match token.kind {
            TokenKind::Whitespace => continue,
            TokenKind::Int | TokenKind::Float => {
                if !expect_operand {
                    return Err(Error::new(vec![token.span.clone()], error::ExpectedOperator));
                }
                // the tokenizer only produces lexemes that `f64` can parse
                output.push(token.lexeme.parse().unwrap());
                expect_operand = false;
            },
            TokenKind::Name => {
                if !expect_operand {
                    return Err(Error::new(vec![token.span.clone()], error::ExpectedOperator));
                }

                if matches!(tokens.peek(), Some(t) if t.kind == TokenKind::OpenParen) {
                    tokens.next();

                    if matches!(tokens.peek(), Some(t) if t.kind == TokenKind::CloseParen) {
                        let close = tokens.next().unwrap();
                        apply_call(
                            ctxt,
                            token.lexeme,
                            token.span.start..close.span.end,
                            0,
                            &mut output,
                        )?;
                        expect_operand = false;
                    } else {
                        stack.push(StackEntry::Call {
                            name: token.lexeme.to_owned(),
                            span: token.span.clone(),
                            args: 0,
                        });
                    }
                } else {
                    match ctxt.get_var(token.lexeme) {
                        Some(value) => output.push(value),
                        None => {
                            return Err(Error::new(vec![token.span.clone()], error::UndefinedVariable {
                                name: token.lexeme.to_owned(),
                                suggestions: ctxt.get_similar_vars(token.lexeme),
                            }));
                        },
                    }
                    expect_operand = false;
                }
            },
            TokenKind::Add | TokenKind::Sub | TokenKind::Mul | TokenKind::Div | TokenKind::Exp => {
                if expect_operand {
                    return Err(Error::new(vec![token.span.clone()], error::ExpectedOperand));
                }

                let op = match token.kind {
                    TokenKind::Add => BinOpKind::Add,
                    TokenKind::Sub => BinOpKind::Sub,
                    TokenKind::Mul => BinOpKind::Mul,
                    TokenKind::Div => BinOpKind::Div,
                    _ => BinOpKind::Pow,
                };

                while let Some(StackEntry::Op { op: top }) = stack.last() {
                    let top = *top;
                    if precedence(top) > precedence(op)
                        || (precedence(top) == precedence(op) && !is_right_associative(op))
                    {
                        stack.pop();
                        apply_op(top, &mut output);
                    } else {
                        break;
                    }
                }

                stack.push(StackEntry::Op { op });
                expect_operand = true;
            },
            TokenKind::OpenParen => {
                if !expect_operand {
                    return Err(Error::new(vec![token.span.clone()], error::ExpectedOperator));
                }
                stack.push(StackEntry::Paren { span: token.span.clone() });
            },
            TokenKind::CloseParen => {
                if expect_operand {
                    return Err(Error::new(vec![token.span.clone()], error::ExpectedOperand));
                }

                loop {
                    match stack.pop() {
                        Some(StackEntry::Op { op }) => apply_op(op, &mut output),
                        Some(StackEntry::Paren { .. }) => break,
                        Some(StackEntry::Call { name, span, args }) => {
                            apply_call(
                                ctxt,
                                &name,
                                span.start..token.span.end,
                                args + 1,
                                &mut output,
                            )?;
                            break;
                        },
                        None => {
                            return Err(Error::new(
                                vec![token.span.clone()],
                                error::UnclosedParenthesis { opening: false },
                            ));
                        },
                    }
                }
            },
            TokenKind::Comma => {
                if expect_operand {
                    return Err(Error::new(vec![token.span.clone()], error::ExpectedOperand));
                }

                loop {
                    match stack.last_mut() {
                        Some(StackEntry::Op { op }) => {
                            let op = *op;
                            stack.pop();
                            apply_op(op, &mut output);
                        },
                        Some(StackEntry::Call { args, .. }) => {
                            *args += 1;
                            break;
                        },
                        Some(StackEntry::Paren { .. }) | None => {
                            return Err(Error::new(vec![token.span.clone()], error::MisplacedComma));
                        },
                    }
                }
                expect_operand = true;
            },
            TokenKind::Symbol => {
                return Err(if expect_operand {
                    Error::new(vec![token.span.clone()], error::ExpectedOperand)
                } else {
                    Error::new(vec![token.span.clone()], error::ExpectedOperator)
                });
            },
        }
    }

    if expect_operand {
        return Err(Error::new(vec![source.len()..source.len()], error::ExpectedOperand));
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Op { op } => apply_op(op, &mut output),
            StackEntry::Paren { span } | StackEntry::Call { span, .. } => {
                return Err(Error::new(vec![span], error::UnclosedParenthesis { opening: true }));
            },
        }
    }

    Ok(output.pop().unwrap())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use super::*;
    use super::super::ctxt::Func;

    fn eval_default(source: &str) -> f64 {
        eval(source, &Ctxt::default()).unwrap()
    }

    #[test]
    fn precedence() {
        assert_float_absolute_eq!(eval_default("2 + 3 * 4"), 14.0);
        assert_float_absolute_eq!(eval_default("2 * 3 ^ 2"), 18.0);
    }

    #[test]
    fn parentheses_group() {
        assert_float_absolute_eq!(eval_default("(2 + 3) * 4"), 20.0);
    }

    #[test]
    fn exponentiation_is_right_associative() {
        assert_float_absolute_eq!(eval_default("2 ^ 3 ^ 2"), 512.0);
    }

    #[test]
    fn left_associativity() {
        assert_float_absolute_eq!(eval_default("8 - 4 - 2"), 2.0);
        assert_float_absolute_eq!(eval_default("16 / 4 / 2"), 2.0);
    }

    #[test]
    fn division_by_zero_is_nan() {
        assert!(eval_default("1 / 0").is_nan());
    }

    #[test]
    fn seeded_constants() {
        assert_float_absolute_eq!(eval_default("two_pi / 2"), std::f64::consts::PI);
    }

    #[test]
    fn variables_resolve_through_context() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", 4.0);
        assert_float_absolute_eq!(eval("x * x - 1", &ctxt).unwrap(), 15.0);
    }

    #[test]
    fn builtin_functions() {
        assert_float_absolute_eq!(eval_default("abs(0 - 5)"), 5.0);
        assert_float_absolute_eq!(eval_default("factorial(5)"), 120.0);
        assert_float_absolute_eq!(eval_default("clamp(10, 0, 5)"), 5.0);
        assert_float_absolute_eq!(eval_default("lerp(0, 10, 0.25)"), 2.5);
    }

    #[test]
    fn user_functions_nest() {
        let mut ctxt = Ctxt::default();
        ctxt.add_func("double", Func::new(1, |args| args[0] * 2.0));
        assert_float_absolute_eq!(eval("double(double(3)) + 1", &ctxt).unwrap(), 13.0);
    }

    #[test]
    fn zero_argument_functions() {
        let mut ctxt = Ctxt::new();
        ctxt.add_func("answer", Func::new(0, |_| 42.0));
        assert_float_absolute_eq!(eval("answer() + 1", &ctxt).unwrap(), 43.0);
    }

    #[test]
    fn function_arguments_are_full_expressions() {
        assert_float_absolute_eq!(eval_default("clamp(2 * 3, 0, 10 - 5)"), 5.0);
    }

    #[test]
    fn rejects_malformed_input() {
        let ctxt = Ctxt::default();
        assert!(eval("", &ctxt).is_err());
        assert!(eval("3 +", &ctxt).is_err());
        assert!(eval("* 3", &ctxt).is_err());
        assert!(eval("(1", &ctxt).is_err());
        assert!(eval("1)", &ctxt).is_err());
        assert!(eval("1, 2", &ctxt).is_err());
        assert!(eval("2 $ 2", &ctxt).is_err());
    }

    #[test]
    fn rejects_unknown_names() {
        let ctxt = Ctxt::default();
        assert!(eval("nope + 1", &ctxt).is_err());
        assert!(eval("abz(1)", &ctxt).is_err());
    }

    #[test]
    fn rejects_wrong_arity() {
        let ctxt = Ctxt::default();
        assert!(eval("abs(1, 2)", &ctxt).is_err());
        assert!(eval("clamp(1)", &ctxt).is_err());
    }

    #[test]
    fn no_unary_operators() {
        let ctxt = Ctxt::default();
        assert!(eval("-3", &ctxt).is_err());
        assert_float_absolute_eq!(eval("0 - 3", &ctxt).unwrap(), -3.0);
    }
}
