use pest::Parser;
use figura::{ExprParser, Rule};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "2x^2 - sin(pi x)/x".to_string());

    println!("Parsing: {}", input);
    println!();

    match ExprParser::parse(Rule::expression, &input) {
        Ok(pairs) => {
            println!(
                "{}",
                pest_ascii_tree::into_ascii_tree(pairs.clone()).unwrap()
            );
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
        }
    }

    match figura::validate_expression(&input) {
        Ok(compiled) => {
            println!("AST: {:#?}", compiled.ast());
            for x in [-1.0, 0.0, 1.0] {
                println!("f({}) = {:?}", x, figura::Evaluator::evaluate(&compiled, x));
            }
        }
        Err(e) => eprintln!("{:?}", miette::Report::new(e)),
    }
}
