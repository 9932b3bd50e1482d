//! Demonstrate panic-mode recovery on malformed input.

use axis::{Lexer, Parser};

fn main() {
    let lexer = Lexer::new("1 + ; 2 * 3;\n4 @ 5;\n(6;");
    let mut parser = Parser::with_error_handler(lexer, |line, msg| {
        println!("  reported: line {line}: {msg}");
    });

    println!("Parsing with errors:");
    let program = parser.parse_program();
    println!("Recovered tree:\n{}", program.debug());
    println!("had_error = {}", parser.had_error());

    println!();

    // The one-shot helper returns typed errors instead.
    match axis::parse_str("1 + ;\n\"unclosed\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(errors) => {
            for e in &errors {
                match e {
                    axis::Error::Lex(e) => println!("Lex error: {e}\n  Kind: {:?}", e.kind),
                    axis::Error::Parse(e) => println!("Parse error: {e}\n  Kind: {:?}", e.kind),
                }
            }
        }
    }
}
