use alg_compute::symbolic::DerivativeError;
use alg_error::Error as EvalError;
use alg_parser::parser::error::Error as ParseError;
use ariadne::Source;

/// Utility enum to package errors that can occur while parsing / evaluating.
pub enum Error {
    /// An error that occurred while parsing a symbolic expression.
    Parse(ParseError),

    /// An error that occurred while evaluating calculator input.
    Eval(EvalError),

    /// An error that occurred while differentiating.
    Derivative(DerivativeError),
}

impl Error {
    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's `Report` type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Parse(err) => {
                let report = err.build_report("input");
                report.eprint(("input", Source::from(input))).unwrap();
            },
            Self::Eval(err) => {
                let report = err.build_report("input");
                report.eprint(("input", Source::from(input))).unwrap();
            },
            Self::Derivative(err) => eprintln!("error: {}", err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        Self::Eval(err)
    }
}

impl From<DerivativeError> for Error {
    fn from(err: DerivativeError) -> Self {
        Self::Derivative(err)
    }
}
