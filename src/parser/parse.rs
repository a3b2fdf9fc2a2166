//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, token navigation helpers, panic-mode recovery and
//! the [`Parser::parse_program`] entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, recovery and coordination
//! - `declarations`: `int`/`float` variable declarations
//! - `expressions`: expressions with precedence climbing, assignments
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! # Error Recovery
//!
//! A syntax error records a [`Diagnostic`], switches the parser into
//! recovering mode and returns [`ParseError::Recoverable`] up to
//! [`Parser::parse_program`], which calls [`Parser::synchronize`] and carries
//! on with the next statement.

use crate::diagnostics::{Diagnostic, Diagnostics, FatalError};
use crate::parser::ast::*;
use crate::parser::token::{Token, TokenBuffer, TokenKind};
use crate::table::{DeclarationTable, SymbolTable};
use log::{debug, trace};

/// Why a parsing method did not produce a node
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A diagnostic was recorded and the parser is recovering.
    #[error("syntax error")]
    Recoverable,
    #[error(transparent)]
    Fatal(#[from] FatalError),
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Scanning,
    Recovering,
}

/// Everything a finished parse produced.
#[derive(Debug)]
pub struct Program {
    pub file_label: String,
    pub arena: AstArena,
    /// Root node of each successfully parsed top-level statement
    pub statements: Vec<NodeId>,
    pub declarations: DeclarationTable,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Program {
    /// Root of the first statement, if any statement parsed.
    pub fn entry(&self) -> Option<NodeId> {
        self.statements.first().copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Recursive descent parser over a sealed [`TokenBuffer`]
pub struct Parser {
    tokens: TokenBuffer,
    position: usize,
    pub(crate) arena: AstArena,
    pub(crate) declarations: DeclarationTable,
    pub(crate) symbols: SymbolTable,
    diagnostics: Diagnostics,
    mode: Mode,
    had_error: bool,
}

impl Parser {
    pub fn new(tokens: TokenBuffer) -> Self {
        Self {
            tokens,
            position: 0,
            arena: AstArena::new(),
            declarations: DeclarationTable::new(),
            symbols: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            mode: Mode::Scanning,
            had_error: false,
        }
    }

    /// Parse top-level statements until EOF.
    ///
    /// Syntax errors end up in [`Program::diagnostics`]; only a
    /// [`FatalError`] aborts the parse.
    pub fn parse_program(mut self) -> Result<Program, FatalError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.parse_statement() {
                Ok(node) => statements.push(node),
                Err(ParseError::Recoverable) => self.synchronize(),
                Err(ParseError::Fatal(err)) => return Err(err),
            }
        }

        debug!(
            "{}: parsed {} statements into {} nodes, {} diagnostics",
            self.tokens.file_label(),
            statements.len(),
            self.arena.len(),
            self.diagnostics.len()
        );

        Ok(Program {
            file_label: self.tokens.file_label().to_string(),
            arena: self.arena,
            statements,
            declarations: self.declarations,
            symbols: self.symbols,
            diagnostics: self.diagnostics.into_vec(),
        })
    }

    /// Parse a single statement: a declaration or an expression statement
    pub fn parse_statement(&mut self) -> ParseResult<NodeId> {
        if self.is_type_keyword() {
            return self.parse_declaration();
        }

        let expr = self.parse_assignment()?;
        self.expect_semicolon("after expression")?;
        Ok(expr)
    }

    /// Skip tokens up to and including the next synchronization point, then
    /// resume scanning. Stops at EOF without consuming it.
    pub fn synchronize(&mut self) {
        while !self.is_at_end() {
            let kind = self.current().kind;
            self.advance();
            if kind.is_synchronization_point() {
                break;
            }
        }
        trace!("resynchronized at {}", self.current().location);
        self.mode = Mode::Scanning;
    }

    // ===== Accessors =====

    pub fn arena(&self) -> &AstArena {
        &self.arena
    }

    pub fn declarations(&self) -> &DeclarationTable {
        &self.declarations
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    /// Whether any syntax error has been reported so far
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn is_recovering(&self) -> bool {
        self.mode == Mode::Recovering
    }

    /// Token under the cursor
    pub fn current(&self) -> &Token {
        self.tokens.get_or_eof(self.position)
    }

    /// Token one past the cursor; EOF when there is none
    pub fn peek(&self) -> &Token {
        self.tokens.get_or_eof(self.position + 1)
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(self.current().kind, TokenKind::Int | TokenKind::Float)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn previous(&self) -> &Token {
        self.tokens.get_or_eof(self.position.saturating_sub(1))
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current().location
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            let message = format!("{}, found {}", message, self.current());
            Err(self.error_at_current(message))
        }
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> ParseResult<Token> {
        self.expect_token(TokenKind::RParen, &format!("Expected ')' {ctx}"))
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> ParseResult<Token> {
        self.expect_token(TokenKind::Semicolon, &format!("Expected ';' {ctx}"))
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<Token> {
        self.expect_token(TokenKind::Identifier, "Expected identifier")
    }

    /// Append a node to the arena
    pub(crate) fn push_node(&mut self, node: AstNode) -> ParseResult<NodeId> {
        let id = self.arena.push(node)?;
        trace!("node {} = {:?}", id, self.arena[id]);
        Ok(id)
    }

    /// Record a syntax error spanning the current token.
    pub(crate) fn error_at_current(&mut self, message: impl Into<String>) -> ParseError {
        let token = self.current();
        let diagnostic = Diagnostic::syntax(message, token.location).with_width(token.width());
        self.report(diagnostic)
    }

    /// Record `diagnostic` and enter recovering mode.
    ///
    /// Errors raised while already recovering are not recorded again.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) -> ParseError {
        self.had_error = true;
        if self.mode == Mode::Recovering {
            return ParseError::Recoverable;
        }
        self.mode = Mode::Recovering;

        debug!(
            "{}:{} {}",
            self.tokens.file_label(),
            diagnostic.location,
            diagnostic.message
        );
        match self.diagnostics.push(diagnostic) {
            Ok(()) => ParseError::Recoverable,
            Err(fatal) => ParseError::Fatal(fatal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MAX_DIAGNOSTICS;
    use crate::parser::lexer::tokenize;
    use test_log::test;

    fn parser(source: &str) -> Parser {
        Parser::new(tokenize(source, "test.cj").unwrap().tokens)
    }

    fn program(source: &str) -> Program {
        parser(source).parse_program().unwrap()
    }

    #[test]
    fn test_parse_declarations_and_expressions() {
        let program = program("int x = 1 + 2;\nfloat y = 2.5;\nx = 3;\n4 * 5;");

        assert_eq!(program.statements.len(), 4);
        assert!(!program.has_errors());
        assert!(matches!(
            program.arena[program.entry().unwrap()],
            AstNode::VariableDeclaration { .. }
        ));
    }

    #[test]
    fn test_empty_program() {
        let program = program("");

        assert!(program.statements.is_empty());
        assert!(program.entry().is_none());
        assert!(program.arena.is_empty());
    }

    #[test]
    fn test_missing_semicolon_reports_and_recovers() {
        let program = program("int x = 1\nint y = 2;");

        assert_eq!(program.diagnostics.len(), 1);
        let diagnostic = &program.diagnostics[0];
        assert_eq!(diagnostic.message, "Expected ';' after declaration, found 'int'");
        assert_eq!((diagnostic.line(), diagnostic.column()), (2, 1));
    }

    #[test]
    fn test_recovery_resumes_after_sync_token() {
        let program = program("int = 4; int z = 7;");

        assert_eq!(program.diagnostics.len(), 1);
        assert_eq!(program.statements.len(), 1);
        assert!(program.declarations.contains_key("z"));
    }

    #[test]
    fn test_synchronize_stops_at_eof() {
        let mut parser = parser("1 2 3");
        parser.synchronize();

        assert!(parser.is_at_end());
        assert!(!parser.is_recovering());
        parser.synchronize();
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_error_at_eof() {
        let program = program("int x =");

        assert_eq!(program.diagnostics.len(), 1);
        assert_eq!(
            program.diagnostics[0].message,
            "Expected expression, found end of file"
        );
    }

    #[test]
    fn test_errors_while_recovering_are_not_recorded() {
        let mut parser = parser(")");
        let first = parser.error_at_current("first");
        let second = parser.error_at_current("second");

        assert!(matches!(first, ParseError::Recoverable));
        assert!(matches!(second, ParseError::Recoverable));
        assert_eq!(parser.diagnostics().len(), 1);
        assert!(parser.had_error());
    }

    #[test]
    fn test_too_many_errors_is_fatal() {
        let source = ")".repeat(MAX_DIAGNOSTICS + 1);

        match parser(&source).parse_program() {
            Err(FatalError::TooManyDiagnostics {
                diagnostics,
                overflow,
            }) => {
                assert_eq!(diagnostics.len(), MAX_DIAGNOSTICS);
                assert_eq!(overflow.column(), MAX_DIAGNOSTICS + 1);
            }
            other => panic!("Expected fatal error, got {:?}", other),
        }
    }

    #[test]
    fn test_current_and_peek() {
        let parser = parser("x = 1;");

        assert_eq!(parser.current().text, "x");
        assert_eq!(parser.peek().kind, TokenKind::Assign);
    }
}
