//! # Introduction
//!
//! cjit is the front end of a small C-like language: a lexer that never gives
//! up on bad input and a recursive descent parser that records syntax errors
//! and resynchronizes instead of stopping at the first one.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → TokenBuffer → Parser → AstArena + tables + diagnostics
//! ```
//!
//! 1. [`parser::lexer`] turns the source into a [`parser::token::TokenBuffer`]
//!    ending in a single EOF token, plus lexical diagnostics.
//! 2. [`parser::parse::Parser`] builds nodes into a [`parser::ast::AstArena`]
//!    and fills the [`table::DeclarationTable`] and [`table::SymbolTable`].
//! 3. [`diagnostics`] holds the bounded diagnostic list and renders entries
//!    with a highlighted excerpt of the offending line.
//!
//! ## Example
//!
//! ```
//! let parsed = cjit::parse_source("int x = 1 + 2 * 3;", "demo.cj").unwrap();
//! let program = parsed.program;
//!
//! assert!(program.diagnostics.is_empty());
//! assert!(program.declarations.contains_key("x"));
//! ```

pub mod diagnostics;
pub mod parser;
pub mod table;

use diagnostics::{Diagnostic, FatalError};
use parser::parse::{Parser, Program};

/// Result of running both phases over one source file.
#[derive(Debug)]
pub struct Parsed {
    pub lexical_diagnostics: Vec<Diagnostic>,
    pub program: Program,
}

/// Lex and parse `source`.
pub fn parse_source(source: &str, file_label: &str) -> Result<Parsed, FatalError> {
    let lexed = parser::lexer::tokenize(source, file_label)?;
    let program = Parser::new(lexed.tokens).parse_program()?;
    Ok(Parsed {
        lexical_diagnostics: lexed.diagnostics,
        program,
    })
}
