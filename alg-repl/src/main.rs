mod error;

use alg_compute::numerical::{ctxt::Ctxt, eval::eval};
use alg_compute::symbolic::{derivative, simplify};
use alg_parser::parser::parse;
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};

/// Evaluates a single line of input, updating the context on assignment.
///
/// Three command forms are understood in addition to plain calculator input:
///
/// - `<name> = <expression>` evaluates the right-hand side and stores it as a variable;
/// - `diff <var> <expression>` prints the symbolic derivative of the expression;
/// - `simplify <expression>` prints the expression with its literal subtrees folded.
fn process(input: &str, ctxt: &mut Ctxt) -> Result<Option<f64>, Error> {
    if let Some(rest) = input.strip_prefix("diff ") {
        let (var, expr_src) = rest.trim().split_once(' ').unwrap_or((rest.trim(), ""));
        let expr = parse(expr_src)?;
        let deriv = derivative(&expr, var)?;
        println!("{}", simplify(deriv));
        return Ok(None);
    }

    if let Some(rest) = input.strip_prefix("simplify ") {
        let expr = parse(rest)?;
        println!("{}", simplify(expr));
        return Ok(None);
    }

    if let Some((name, value_src)) = split_assignment(input) {
        let value = eval(value_src, ctxt)?;
        ctxt.add_var(name, value);
        return Ok(Some(value));
    }

    Ok(Some(eval(input, ctxt)?))
}

/// Splits `name = expression` input, returning the name and the expression source. Returns
/// [`None`] unless the left-hand side is a plain identifier.
fn split_assignment(input: &str) -> Option<(&str, &str)> {
    let (lhs, rhs) = input.split_once('=')?;
    let name = lhs.trim();

    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if starts_with_letter && chars.all(|c| c.is_ascii_alphanumeric()) {
        Some((name, rhs))
    } else {
        None
    }
}

/// Evaluates the input and prints the result or the failure.
fn read_eval(input: &str, ctxt: &mut Ctxt) {
    match process(input, ctxt) {
        Ok(Some(value)) => println!("{}", value),
        Ok(None) => (),
        Err(err) => err.report_to_stderr(input),
    }
}

/// Evaluates each non-empty line of the given source text.
fn execute(input: &str) {
    let mut ctxt = Ctxt::default();
    for line in input.lines() {
        let line = line.trim();
        if !line.is_empty() {
            read_eval(line, &mut ctxt);
        }
    }
}

fn main() {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        let mut file = BufReader::new(File::open(filename).unwrap());
        let mut input = String::new();
        file.read_to_string(&mut input).unwrap();

        execute(&input);
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).unwrap();

        execute(&input);
    } else {
        // run the repl / interactive mode
        let mut rl = DefaultEditor::new().unwrap();
        let mut ctxt = Ctxt::default();

        fn process_line(rl: &mut DefaultEditor, ctxt: &mut Ctxt) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            read_eval(input.trim(), ctxt);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut ctxt) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
