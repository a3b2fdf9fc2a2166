//! Expression parsing implementation
//!
//! Binary operators are parsed by precedence climbing; literals, parentheses
//! and prefix signs by recursive descent.
//!
//! # Precedence
//!
//! | operators | precedence |
//! |-----------|------------|
//! | `+` `-`   | 1          |
//! | `*` `/`   | 2          |
//! | any other | 0          |
//!
//! A token of precedence 0 ends the expression.

use crate::parser::ast::*;
use crate::parser::parse::{ParseResult, Parser};
use crate::parser::token::TokenKind;
use log::trace;

/// Binary operator and precedence for `kind`, if it is one
fn binary_operator(kind: TokenKind) -> Option<(BinOp, u8)> {
    match kind {
        TokenKind::Plus => Some((BinOp::Add, 1)),
        TokenKind::Minus => Some((BinOp::Sub, 1)),
        TokenKind::Star => Some((BinOp::Mul, 2)),
        TokenKind::Slash => Some((BinOp::Div, 2)),
        _ => None,
    }
}

pub fn precedence(kind: TokenKind) -> u8 {
    binary_operator(kind).map_or(0, |(_, precedence)| precedence)
}

impl Parser {
    /// Parse an expression whose operators all bind tighter than
    /// `min_precedence`.
    pub fn parse_expression(&mut self, min_precedence: u8) -> ParseResult<NodeId> {
        let mut left = self.parse_unary()?;

        loop {
            if self.is_at_end() {
                return Ok(left);
            }
            let Some((op, precedence)) = binary_operator(self.current().kind) else {
                return Ok(left);
            };
            if precedence <= min_precedence {
                return Ok(left);
            }

            let location = self.current_location();
            self.advance();
            let right = self.parse_expression(precedence)?;

            left = self.push_node(AstNode::Binary {
                op,
                left,
                right,
                location,
            })?;
        }
    }

    /// Assignment expression: `name = <assignment>` or a plain expression
    pub fn parse_assignment(&mut self) -> ParseResult<NodeId> {
        if self.check(TokenKind::Identifier) && self.peek().kind == TokenKind::Assign {
            let target = self.advance().clone();
            self.advance(); // consume '='

            let initializer = self.parse_assignment()?;
            return self.push_node(AstNode::Assignment {
                name: target.text,
                initializer,
                location: target.location,
            });
        }

        self.parse_expression(0)
    }

    /// Prefix `+`/`-`. The sign is consumed but no `Unary` node is built.
    pub(crate) fn parse_unary(&mut self) -> ParseResult<NodeId> {
        if self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            let sign = self.advance();
            trace!("dropping prefix {} at {}", sign.kind, sign.location);
        }

        self.parse_primary()
    }

    /// Literals and parenthesized expressions
    pub(crate) fn parse_primary(&mut self) -> ParseResult<NodeId> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::IntLiteral | TokenKind::FloatLiteral => {
                self.advance();
                let literal_type = if token.kind == TokenKind::IntLiteral {
                    LiteralType::Int
                } else {
                    LiteralType::Float
                };
                self.push_node(AstNode::Literal {
                    raw: token.text,
                    literal_type,
                    location: token.location,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression(0)?;
                self.expect_rparen("to close expression")?;
                Ok(inner)
            }
            _ => Err(self.error_at_current(format!("Expected expression, found {}", token))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::pretty::to_sexpr;
    use test_log::test;

    fn expression(source: &str) -> String {
        let mut parser = Parser::new(tokenize(source, "test.cj").unwrap().tokens);
        let root = parser.parse_expression(0).unwrap();
        to_sexpr(parser.arena(), root)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(expression("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(expression("1 * 2 + 3"), "(+ (* 1 2) 3)");
        assert_eq!(expression("8 / 4 - 1 * 2"), "(- (/ 8 4) (* 1 2))");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(expression("(1 + 2) * 3"), "(* (+ 1 2) 3)");
        assert_eq!(expression("((4))"), "4");
    }

    #[test]
    fn test_equal_precedence_nests_left() {
        assert_eq!(expression("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(expression("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    }

    #[test]
    fn test_prefix_sign_is_dropped() {
        assert_eq!(expression("-5"), "5");
        assert_eq!(expression("+2.5 * -1"), "(* 2.5 1)");
    }

    #[test]
    fn test_stops_at_non_operator() {
        let mut parser = Parser::new(tokenize("1 + 2; 3", "test.cj").unwrap().tokens);
        parser.parse_expression(0).unwrap();

        assert_eq!(parser.current().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_assignment_is_right_nested() {
        let mut parser = Parser::new(tokenize("a = b = 1 + 2", "test.cj").unwrap().tokens);
        let root = parser.parse_assignment().unwrap();

        assert_eq!(to_sexpr(parser.arena(), root), "(= a (= b (+ 1 2)))");
    }

    #[test]
    fn test_identifier_operand_is_an_error() {
        let mut parser = Parser::new(tokenize("x + 1", "test.cj").unwrap().tokens);

        assert!(parser.parse_expression(0).is_err());
        assert_eq!(
            parser.diagnostics()[0].message,
            "Expected expression, found identifier 'x'"
        );
    }

    #[test]
    fn test_unclosed_paren() {
        let mut parser = Parser::new(tokenize("(1 + 2", "test.cj").unwrap().tokens);

        assert!(parser.parse_expression(0).is_err());
        assert_eq!(
            parser.diagnostics()[0].message,
            "Expected ')' to close expression, found end of file"
        );
    }

    #[test]
    fn test_precedence_table() {
        assert_eq!(precedence(TokenKind::Plus), 1);
        assert_eq!(precedence(TokenKind::Minus), 1);
        assert_eq!(precedence(TokenKind::Star), 2);
        assert_eq!(precedence(TokenKind::Slash), 2);
        assert_eq!(precedence(TokenKind::Power), 0);
        assert_eq!(precedence(TokenKind::Semicolon), 0);
    }
}
