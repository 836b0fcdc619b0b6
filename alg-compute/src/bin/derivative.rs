use alg_compute::symbolic::{derivative, eval, simplify};
use alg_parser::parser::{expr::Expr, Parser};

fn main() {
    let mut parser = Parser::new("x * x + 5 * x + 6");
    let expr = parser.try_parse_full::<Expr>().unwrap();

    let deriv = derivative(&expr, "x").unwrap();
    println!("{deriv}");
    println!("{deriv:?}");

    let folded = simplify(deriv);
    println!("{folded}");

    let at_two = eval(&folded, Some(&|name: &str| if name == "x" { 2.0 } else { f64::NAN }));
    println!("value at x = 2: {at_two}");
}
