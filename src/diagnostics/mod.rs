//! Diagnostics produced while lexing and parsing
//!
//! Lexical diagnostics are collected by the [`Lexer`](crate::parser::lexer::Lexer)
//! and never abort a run. Syntax diagnostics go into a bounded [`Diagnostics`]
//! list owned by the parser; recording into a full list is a [`FatalError`]
//! that hands every collected diagnostic back to the caller.
//!
//! - [`render`]: `file:line:col` output with a highlighted source excerpt

pub mod render;

use crate::parser::ast::SourceLocation;
use std::collections::TryReserveError;
use std::fmt;

/// Capacity of the parser's diagnostic list.
pub const MAX_DIAGNOSTICS: usize = 255;

/// Which phase produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical error"),
            DiagnosticKind::Syntax => write!(f, "syntax error"),
            DiagnosticKind::Semantic => write!(f, "semantic error"),
        }
    }
}

/// A single diagnostic message anchored at a source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub location: SourceLocation,
    /// Number of characters to highlight, starting at `location`.
    pub width: usize,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            width: 1,
        }
    }

    pub fn lexical(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(DiagnosticKind::Lexical, message, location)
    }

    pub fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(DiagnosticKind::Syntax, message, location)
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}: {}",
            self.kind, self.location.line, self.location.column, self.message
        )
    }
}

/// Errors that end a run. Everything else is reported as a [`Diagnostic`].
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// The diagnostic list was already full when another diagnostic arrived.
    #[error("too many errors: aborting after {} diagnostics", .diagnostics.len())]
    TooManyDiagnostics {
        diagnostics: Vec<Diagnostic>,
        overflow: Box<Diagnostic>,
    },

    #[error("memory allocation failed while growing the {what}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },
}

/// Bounded list of syntax and semantic diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    ///
    /// Fails once [`MAX_DIAGNOSTICS`] entries are stored; the error owns the
    /// flushed entries and the diagnostic that did not fit, and the list is
    /// left empty.
    pub fn push(&mut self, diagnostic: Diagnostic) -> Result<(), FatalError> {
        if self.is_full() {
            return Err(FatalError::TooManyDiagnostics {
                diagnostics: std::mem::take(&mut self.entries),
                overflow: Box::new(diagnostic),
            });
        }
        self.entries.push(diagnostic);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_DIAGNOSTICS
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
