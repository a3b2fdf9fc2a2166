//! Lexer (tokenizer) for cjit source code
//!
//! Converts raw source text into a [`TokenBuffer`] consumed by the parser.
//! Scanning never fails on bad input: an unrecognized character is reported
//! as a lexical [`Diagnostic`], discarded, and scanning carries on. The only
//! way out is a [`FatalError`] when the token buffer cannot grow.

use super::ast::SourceLocation;
use super::token::{Token, TokenBuffer, TokenKind};
use crate::diagnostics::{Diagnostic, FatalError};
use log::{debug, trace, warn};

/// Result of a full lexing pass
#[derive(Debug, Clone)]
pub struct Lexed {
    pub tokens: TokenBuffer,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize `source`; `file_label` only appears in diagnostics and logs.
pub fn tokenize(source: &str, file_label: &str) -> Result<Lexed, FatalError> {
    Lexer::new(source, file_label).tokenize()
}

/// Lexer for cjit source code
pub struct Lexer<'a> {
    file_label: &'a str,
    input: Vec<char>,
    /// Index into `input`
    position: usize,
    /// Byte offset of `input[position]` in the source text
    offset: usize,
    line: usize,
    column: usize,
    tokens: TokenBuffer,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &str, file_label: &'a str) -> Self {
        Self {
            file_label,
            input: source.chars().collect(),
            position: 0,
            offset: 0,
            line: 1,
            column: 1,
            tokens: TokenBuffer::new(file_label),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the entire input.
    ///
    /// The returned buffer always ends with exactly one EOF token.
    pub fn tokenize(mut self) -> Result<Lexed, FatalError> {
        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                break;
            }

            let ch = self.current();
            if ch.is_ascii_digit() {
                let token = self.number_literal();
                self.push(token)?;
            } else if is_identifier_start(ch) {
                let token = self.identifier_or_keyword();
                self.push(token)?;
            } else if ch == '"' || ch == '\'' {
                let token = self.string_literal();
                self.push(token)?;
            } else if let Some(token) = self.operator_or_punctuation() {
                self.push(token)?;
            } else {
                self.unknown_character(ch);
            }
        }

        let eof = Token::new(
            TokenKind::Eof,
            String::new(),
            self.current_location(),
            self.offset,
            self.offset,
        );
        self.tokens.seal(eof)?;

        debug!(
            "{}: lexed {} tokens with {} diagnostics",
            self.file_label,
            self.tokens.len(),
            self.diagnostics.len()
        );

        Ok(Lexed {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        })
    }

    fn push(&mut self, token: Token) -> Result<(), FatalError> {
        trace!("{}:{} {:?} {:?}", self.file_label, token.location, token.kind, token.text);
        self.tokens.push(token)
    }

    /// Digit run, optionally followed by `.` and another digit run
    fn number_literal(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.offset;
        let mut text = String::new();
        let mut is_float = false;

        while self.current().is_ascii_digit() {
            text.push(self.current());
            self.advance();
        }

        if self.current() == '.' {
            is_float = true;
            text.push('.');
            self.advance();

            while self.current().is_ascii_digit() {
                text.push(self.current());
                self.advance();
            }
        }

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        Token::new(kind, text, loc, start, self.offset)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.offset;
        let mut ident = String::new();

        while !self.is_at_end() && is_identifier_continue(self.current()) {
            ident.push(self.current());
            self.advance();
        }

        let kind = TokenKind::keyword(&ident).unwrap_or(TokenKind::Identifier);
        Token::new(kind, ident, loc, start, self.offset)
    }

    /// Quoted literal kept verbatim, quotes and escapes included
    fn string_literal(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.offset;
        let quote = self.current();
        let mut text = String::new();
        text.push(quote);
        self.advance();

        while !self.is_at_end() {
            let ch = self.current();
            text.push(ch);
            self.advance();

            if ch == '\\' {
                if !self.is_at_end() {
                    text.push(self.current());
                    self.advance();
                }
            } else if ch == quote {
                return Token::new(TokenKind::StringLiteral, text, loc, start, self.offset);
            }
        }

        self.report(
            Diagnostic::lexical("unterminated string literal", loc)
                .with_width(text.chars().count()),
        );
        Token::new(TokenKind::Unknown, text, loc, start, self.offset)
    }

    /// Single-character tokens, extended to two characters when the next
    /// character completes a known pair.
    fn operator_or_punctuation(&mut self) -> Option<Token> {
        let loc = self.current_location();
        let start = self.offset;
        let first = self.current();
        let single = single_char_token(first)?;

        let second = self.peek_next();
        let mut text = String::from(first);
        let kind = match two_char_token(first, second) {
            Some(kind) => {
                self.advance();
                text.push(second);
                kind
            }
            None => single,
        };
        self.advance();

        Some(Token::new(kind, text, loc, start, self.offset))
    }

    fn unknown_character(&mut self, ch: char) {
        let loc = self.current_location();
        self.report(Diagnostic::lexical(
            format!("unknown character '{}'", ch.escape_debug()),
            loc,
        ));
        self.advance();
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(
            "{}:{}:{} {}",
            self.file_label,
            diagnostic.location.line,
            diagnostic.location.column,
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.current() {
                ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C' => {
                    self.advance();
                }
                '/' if self.peek_next() == '/' => self.skip_line_comment(),
                '/' if self.peek_next() == '*' => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.current() != '\n' {
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.current() == '*' && self.peek_next() == '/' {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return;
            }
            self.advance();
        }

        self.report(Diagnostic::lexical("unterminated block comment", start_loc).with_width(2));
    }

    /// Character under the cursor, or `'\0'` once the input is exhausted
    fn current(&self) -> char {
        self.input.get(self.position).copied().unwrap_or('\0')
    }

    /// One character of lookahead, `'\0'` past the end of the input
    fn peek_next(&self) -> char {
        self.input.get(self.position + 1).copied().unwrap_or('\0')
    }

    /// Advance to next character
    fn advance(&mut self) {
        let Some(&ch) = self.input.get(self.position) else {
            return;
        };

        self.position += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Cyrillic block, accepted in identifiers alongside ASCII letters
fn is_cyrillic(ch: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&ch)
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || is_cyrillic(ch)
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || is_cyrillic(ch)
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '=' => TokenKind::Assign,
        '!' => TokenKind::Bang,
        '>' => TokenKind::Greater,
        '<' => TokenKind::Less,
        '&' => TokenKind::Amp,
        '|' => TokenKind::Pipe,
        '~' => TokenKind::Tilde,
        ';' => TokenKind::Semicolon,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Dot,
        _ => return None,
    };
    Some(kind)
}

fn two_char_token(first: char, second: char) -> Option<TokenKind> {
    let kind = match (first, second) {
        ('=', '=') => TokenKind::EqEq,
        ('!', '=') => TokenKind::NotEq,
        ('>', '=') => TokenKind::GreaterEq,
        ('<', '=') => TokenKind::LessEq,
        ('&', '&') => TokenKind::AndAnd,
        ('|', '|') => TokenKind::OrOr,
        ('+', '+') => TokenKind::Increment,
        ('-', '-') => TokenKind::Decrement,
        ('*', '*') => TokenKind::Power,
        _ => return None,
    };
    Some(kind)
}
