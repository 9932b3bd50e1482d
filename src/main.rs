//! CLI tool to parse Axis source files and print their syntax tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use axis::{Lexer, Parser, TokenKind};
use clap::{Parser as CliParser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

/// Front-end for the Axis experimental language
#[derive(CliParser, Debug)]
#[command(name = "axis", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a file and print the debug form of its syntax tree
    Compile {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the token stream of a file, one token per line
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a file and print it back as formatted source
    Fmt {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when the source had errors.
fn run(command: &Command) -> Result<bool> {
    match command {
        Command::Compile { file } => {
            let source = read_source(file)?;
            let mut parser = Parser::with_error_handler(Lexer::new(&source), report);
            let program = parser.parse_program();
            println!("{}", program.debug());
            Ok(!parser.had_error())
        }
        Command::Tokens { file } => {
            let source = read_source(file)?;
            let mut clean = true;
            let mut lexer = Lexer::with_error_handler(&source, report);
            loop {
                let token = lexer.scan_token();
                println!("{token}");
                match token.kind {
                    TokenKind::Eof => break,
                    TokenKind::Error => clean = false,
                    _ => {}
                }
            }
            Ok(clean)
        }
        Command::Fmt { file } => {
            let source = read_source(file)?;
            let mut parser = Parser::with_error_handler(Lexer::new(&source), report);
            let program = parser.parse_program();
            if parser.had_error() {
                return Ok(false);
            }
            print!("{}", axis::format(&program));
            Ok(true)
        }
    }
}

fn read_source(path: &Path) -> Result<String> {
    tracing::info!(path = %path.display(), "reading source");
    fs::read_to_string(path).with_context(|| format!("while opening file {}", path.display()))
}

fn report(line: usize, message: &str) {
    eprintln!("[line {line}] Error: {message}");
}
