//! Error kinds reported by the calculator. The carrying type is [`alg_error::Error`], which
//! pairs each kind with the spans it points at.

use alg_attrs::ErrorKind;
use alg_error::{ErrorKind, EXPR};
use ariadne::Fmt;

/// The variable is not defined in the evaluation context.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", name),
    labels = ["this variable"],
    help = if suggestions.is_empty() {
        format!("to define it, assign to it first: {} = {}", name.fg(EXPR), "<expression>".fg(EXPR))
    } else {
        format!(
            "did you mean one of these? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UndefinedVariable {
    /// The name of the variable that was undefined.
    pub name: String,

    /// A list of similarly named variables, if any.
    pub suggestions: Vec<String>,
}

/// The function is not defined in the evaluation context.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        "register the function in the context before calling it".to_string()
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UndefinedFunction {
    /// The name of the function that was undefined.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments for the `{}` function", name),
    labels = ["this function call"],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given
    ),
)]
pub struct WrongNumberOfArguments {
    /// The name of the function that was called.
    pub name: String,

    /// The number of arguments that were expected.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// An operand was expected, but something else (or the end of input) was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an operand",
    labels = [format!("expected a {} here", "number, variable, or parenthesized expression".fg(EXPR))],
)]
pub struct ExpectedOperand;

/// An operator was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an operator",
    labels = [format!("expected an {} here", "operator".fg(EXPR))],
)]
pub struct ExpectedOperator;

/// A comma appeared outside the arguments of a function call.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "misplaced comma",
    labels = ["commas only separate the arguments of a function call"],
)]
pub struct MisplacedComma;

/// The input contained no expression at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = ["there is nothing to evaluate here"],
)]
pub struct EmptyExpression;
