//! Parse a small program, print its tree, and format it back.

fn main() {
    let input = "1+2*3;\n(1 + 2)   * 3;\nTrue or -4 >= 2;\n";

    match axis::parse_str(input) {
        Ok(program) => {
            println!("--- tree ---");
            println!("{}", program.debug());
            println!("--- formatted ---");
            print!("{}", axis::format(&program));
        }
        Err(errors) => {
            for e in errors {
                eprintln!("{e}");
            }
        }
    }
}
