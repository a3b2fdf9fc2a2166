//! cjit source code parser
//!
//! This module transforms cjit source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → [`token::TokenBuffer`])
//! - [`parse`]: Parser state, recovery and the program entry point
//! - [`expressions`], [`declarations`]: the grammar, as `impl Parser` blocks
//! - [`ast`]: AST node definitions and the node arena
//! - [`pretty`]: text dumps of the tree
//!
//! # Supported Language
//!
//! - Declarations: `int x = <expr>;` and `float y = <expr>;`, one name each
//! - Expression statements: `x = y = <expr>;`, `<expr>;`
//! - Expressions: int and float literals, `+ - * /`, parentheses
//! - The lexer also recognizes strings, comparison and logical operators and
//!   the `bool if else for while return import` keywords, which the parser
//!   reports as unexpected
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod pretty;
pub mod token;
