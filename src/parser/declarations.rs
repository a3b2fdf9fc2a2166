//! Declaration parsing implementation
//!
//! # Grammar
//!
//! ```text
//! declaration ::= type identifier "=" assignment ";"
//! type        ::= "int" | "float"
//! assignment  ::= identifier "=" assignment | expression
//! ```
//!
//! One name per declaration; `int a = 1, b = 2;` is rejected at the comma.

use crate::parser::ast::*;
use crate::parser::parse::{ParseResult, Parser};
use crate::parser::token::TokenKind;
use crate::table::Declaration;

impl Parser {
    /// Parse `int|float name = <assignment>;`
    ///
    /// The name goes into the declaration table as soon as it is read, so a
    /// declaration that fails later in the statement is still recorded. The
    /// symbol table maps the name to the finished declaration node.
    pub fn parse_declaration(&mut self) -> ParseResult<NodeId> {
        let location = self.current_location();
        let literal_type = self.parse_type()?;

        let name = self.expect_identifier()?.text;
        self.declarations
            .insert(name.clone(), Declaration::variable(literal_type));

        self.expect_token(TokenKind::Assign, "Expected '=' after variable name")?;
        let initializer = self.parse_assignment()?;

        let node = self.push_node(AstNode::VariableDeclaration {
            name: name.clone(),
            literal_type,
            initializer,
            location,
        })?;
        self.symbols.insert(name, node);

        self.expect_semicolon("after declaration")?;
        Ok(node)
    }

    /// Parse type keyword: `int` or `float`
    fn parse_type(&mut self) -> ParseResult<LiteralType> {
        if self.match_token(TokenKind::Int) {
            Ok(LiteralType::Int)
        } else if self.match_token(TokenKind::Float) {
            Ok(LiteralType::Float)
        } else {
            let message = format!("Expected type, found {}", self.current());
            Err(self.error_at_current(message))
        }
    }
}
