// cjit: lex and parse a source file, then report tokens, AST and diagnostics

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use log::{debug, LevelFilter};

use cjit::diagnostics::render::render;
use cjit::diagnostics::{Diagnostic, FatalError};
use cjit::parser::lexer::tokenize;
use cjit::parser::parse::Parser;
use cjit::parser::pretty::render_tree;

/// Command line arguments
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Lexes and parses a cjit source file")]
struct Args {
    /// Source file to parse
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    file: PathBuf,
    /// Print every token before parsing
    #[clap(long)]
    tokens: bool,
    /// Do not print the syntax tree
    #[clap(long)]
    no_ast: bool,
    /// Disable coloured diagnostics
    #[clap(long)]
    no_color: bool,
    /// Log level; RUST_LOG overrides it
    #[clap(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();
    debug!("starting cjit with {args:?}");

    let label = args.file.display().to_string();
    let bytes = match fs::read(&args.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", label, e);
            return Ok(ExitCode::from(2));
        }
    };
    let source = String::from_utf8_lossy(&bytes);
    let color = !args.no_color && io::stderr().is_terminal();

    let lexed = match tokenize(&source, &label) {
        Ok(lexed) => lexed,
        Err(e) => return fatal(&e, &source, &label, color),
    };
    report(&lexed.diagnostics, &source, &label, color);

    if args.tokens {
        for token in lexed.tokens.iter() {
            println!(
                "{}:{}:{} {}[{}]: {}",
                label,
                token.line(),
                token.column(),
                token.kind.describe(),
                token.text.len(),
                token.text
            );
        }
    }

    let program = match Parser::new(lexed.tokens).parse_program() {
        Ok(program) => program,
        Err(e) => return fatal(&e, &source, &label, color),
    };

    if !args.no_ast {
        for &statement in &program.statements {
            print!("{}", render_tree(&program.arena, statement));
        }
    }
    report(&program.diagnostics, &source, &label, color);

    if lexed.diagnostics.is_empty() && program.diagnostics.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn report(diagnostics: &[Diagnostic], source: &str, label: &str, color: bool) {
    for diagnostic in diagnostics {
        eprint!("{}", render(diagnostic, source, label, color));
    }
}

fn fatal(
    error: &FatalError,
    source: &str,
    label: &str,
    color: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if let FatalError::TooManyDiagnostics {
        diagnostics,
        overflow,
    } = error
    {
        report(diagnostics, source, label, color);
        report(std::slice::from_ref(&**overflow), source, label, color);
    }
    eprintln!("Error: {}", error);
    Ok(ExitCode::FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from("cjit demo.cj --tokens --no-color".split(' '))
            .expect("could not parse test string");

        assert_eq!(args.file, PathBuf::from("demo.cj"));
        assert!(args.tokens);
        assert!(!args.no_ast);
        assert!(args.no_color);
        assert_eq!(args.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_log_level_flag() {
        let args = Args::try_parse_from(["cjit", "a.cj", "--log-level", "trace"])
            .expect("could not parse test string");

        assert_eq!(args.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::try_parse_from(["cjit"]).is_err());
    }
}
