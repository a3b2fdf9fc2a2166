//! Token model and the append-only token buffer
//!
//! Every [`Token`] owns its source text and position, so parse errors can
//! report an accurate line and column without going back to the source.

use super::ast::SourceLocation;
use crate::diagnostics::FatalError;
use std::fmt;
use std::ops::Index;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Identifier,

    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,

    // Keywords
    Int,
    Float,
    Bool,
    If,
    Else,
    For,
    While,
    Return,
    Import,

    // Operators
    Plus,       // +
    Minus,      // -
    Increment,  // ++
    Decrement,  // --
    Star,       // *
    Power,      // **
    Slash,      // /
    Assign,     // =
    EqEq,       // ==
    NotEq,      // !=
    Greater,    // >
    GreaterEq,  // >=
    Less,       // <
    LessEq,     // <=
    AndAnd,     // &&
    OrOr,       // ||
    Bang,       // !
    Amp,        // &
    Pipe,       // |
    Tilde,      // ~

    // Punctuation
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Dot,       // .

    /// Raw text the lexer could not finish, e.g. an unterminated string
    Unknown,
}

impl TokenKind {
    /// Keyword lookup for a scanned identifier
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "bool" => TokenKind::Bool,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "return" => TokenKind::Return,
            "import" => TokenKind::Import,
            _ => return None,
        };
        Some(kind)
    }

    /// Tokens the parser resumes after when recovering from an error.
    pub fn is_synchronization_point(self) -> bool {
        matches!(self, TokenKind::Semicolon | TokenKind::RBrace | TokenKind::RParen)
    }

    /// Long, human readable name used in token dumps.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Identifier => "Identifier",
            TokenKind::IntLiteral => "Decimal Number",
            TokenKind::FloatLiteral => "Floating Number",
            TokenKind::StringLiteral => "String",
            TokenKind::Int => "Integer Keyword",
            TokenKind::Float => "Float Keyword",
            TokenKind::Bool => "Boolean Keyword",
            TokenKind::If => "If Keyword",
            TokenKind::Else => "Else Keyword",
            TokenKind::For => "For Keyword",
            TokenKind::While => "While Keyword",
            TokenKind::Return => "Return Keyword",
            TokenKind::Import => "Import Keyword",
            TokenKind::Plus => "Plus Operator",
            TokenKind::Minus => "Minus Operator",
            TokenKind::Increment => "Increment Operator",
            TokenKind::Decrement => "Decrement Operator",
            TokenKind::Star => "Multiply Operator",
            TokenKind::Power => "Power Operator",
            TokenKind::Slash => "Divide Operator",
            TokenKind::Assign => "Assignment Operator",
            TokenKind::EqEq => "Equal Operator",
            TokenKind::NotEq => "Not Equal Operator",
            TokenKind::Greater => "Greater Operator",
            TokenKind::GreaterEq => "Greater or Equal Operator",
            TokenKind::Less => "Less Operator",
            TokenKind::LessEq => "Less or Equal Operator",
            TokenKind::AndAnd => "And Operator",
            TokenKind::OrOr => "Or Operator",
            TokenKind::Bang => "Not Operator",
            TokenKind::Amp => "Bitwise And Operator",
            TokenKind::Pipe => "Bitwise Or Operator",
            TokenKind::Tilde => "Bitwise Not Operator",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::LParen => "Left Paren",
            TokenKind::RParen => "Right Paren",
            TokenKind::LBrace => "Left Brace",
            TokenKind::RBrace => "Right Brace",
            TokenKind::LBracket => "Left Bracket",
            TokenKind::RBracket => "Right Bracket",
            TokenKind::Comma => "Comma",
            TokenKind::Dot => "Dot",
            TokenKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::IntLiteral => write!(f, "int literal"),
            TokenKind::FloatLiteral => write!(f, "float literal"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Float => write!(f, "'float'"),
            TokenKind::Bool => write!(f, "'bool'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::For => write!(f, "'for'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Import => write!(f, "'import'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Increment => write!(f, "'++'"),
            TokenKind::Decrement => write!(f, "'--'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Power => write!(f, "'**'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Greater => write!(f, "'>'"),
            TokenKind::GreaterEq => write!(f, "'>='"),
            TokenKind::Less => write!(f, "'<'"),
            TokenKind::LessEq => write!(f, "'<='"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Amp => write!(f, "'&'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Tilde => write!(f, "'~'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Unknown => write!(f, "unknown token"),
        }
    }
}

/// A lexical token with its owned text and source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        location: SourceLocation,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
            start,
            end,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }

    /// Width of the token in characters, at least 1 so it can be highlighted.
    pub fn width(&self) -> usize {
        self.text.chars().count().max(1)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::Unknown => write!(f, "{} {}", self.kind, self.text),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Append-only token sequence terminated by exactly one EOF token.
///
/// Only the lexer builds buffers, and it seals each one with an EOF token
/// before handing it out, so [`TokenBuffer::get_or_eof`] always has a token to
/// return.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    file_label: String,
    tokens: Vec<Token>,
    sealed: bool,
}

impl TokenBuffer {
    pub(crate) fn new(file_label: impl Into<String>) -> Self {
        Self {
            file_label: file_label.into(),
            tokens: Vec::new(),
            sealed: false,
        }
    }

    pub(crate) fn push(&mut self, token: Token) -> Result<(), FatalError> {
        debug_assert!(!self.sealed, "token pushed after EOF");
        self.tokens
            .try_reserve(1)
            .map_err(|source| FatalError::Allocation {
                what: "token buffer",
                source,
            })?;
        self.tokens.push(token);
        Ok(())
    }

    /// Append the EOF token. Called once, after the source is exhausted.
    pub(crate) fn seal(&mut self, eof: Token) -> Result<(), FatalError> {
        debug_assert_eq!(eof.kind, TokenKind::Eof);
        self.push(eof)?;
        self.sealed = true;
        Ok(())
    }

    /// Label of the file the tokens came from, used in diagnostics.
    pub fn file_label(&self) -> &str {
        &self.file_label
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Token at `index`, or the trailing EOF token when `index` is past the end.
    pub fn get_or_eof(&self, index: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[index.min(last)]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl Index<usize> for TokenBuffer {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}
