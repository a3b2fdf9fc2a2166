//! Text dumps of the AST
//!
//! [`render_tree`] produces the indented listing printed by the CLI,
//! [`to_sexpr`] a compact one-line form that is easy to assert on.

use crate::parser::ast::{AstArena, AstNode, NodeId};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Indented multi-line dump of the subtree rooted at `root`.
pub fn render_tree(arena: &AstArena, root: NodeId) -> String {
    let mut out = String::new();
    write_node(&mut out, arena, root, 0);
    out
}

fn write_node(out: &mut String, arena: &AstArena, id: NodeId, depth: usize) {
    let Some(node) = arena.get(id) else {
        return;
    };
    let pad = INDENT.repeat(depth);

    match node {
        AstNode::Literal {
            raw, literal_type, ..
        } => {
            let _ = writeln!(out, "{pad}Literal: {literal_type} {raw}");
        }
        AstNode::Unary { op, operand, .. } => {
            let _ = writeln!(out, "{pad}Unary: {op}");
            write_node(out, arena, *operand, depth + 1);
        }
        AstNode::Binary {
            op, left, right, ..
        } => {
            let _ = writeln!(out, "{pad}Binary: {op}");
            let _ = writeln!(out, "{pad}Left operand:");
            write_node(out, arena, *left, depth + 1);
            let _ = writeln!(out, "{pad}Right operand:");
            write_node(out, arena, *right, depth + 1);
        }
        AstNode::VariableDeclaration {
            name,
            literal_type,
            initializer,
            ..
        } => {
            let _ = writeln!(out, "{pad}Declaration: {literal_type} {name}");
            write_node(out, arena, *initializer, depth + 1);
        }
        AstNode::Assignment {
            name, initializer, ..
        } => {
            let _ = writeln!(out, "{pad}Assignment: {name}");
            write_node(out, arena, *initializer, depth + 1);
        }
    }
}

/// S-expression form, e.g. `(+ 1 (* 2 3))` or `(decl int x 5)`.
pub fn to_sexpr(arena: &AstArena, id: NodeId) -> String {
    let Some(node) = arena.get(id) else {
        return format!("<missing {id}>");
    };

    match node {
        AstNode::Literal { raw, .. } => raw.clone(),
        AstNode::Unary { op, operand, .. } => {
            format!("({} {})", op, to_sexpr(arena, *operand))
        }
        AstNode::Binary {
            op, left, right, ..
        } => format!(
            "({} {} {})",
            op,
            to_sexpr(arena, *left),
            to_sexpr(arena, *right)
        ),
        AstNode::VariableDeclaration {
            name,
            literal_type,
            initializer,
            ..
        } => format!(
            "(decl {} {} {})",
            literal_type,
            name,
            to_sexpr(arena, *initializer)
        ),
        AstNode::Assignment {
            name, initializer, ..
        } => format!("(= {} {})", name, to_sexpr(arena, *initializer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{LiteralType, SourceLocation, UnOp};
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::Parser;
    use test_log::test;

    #[test]
    fn test_render_declaration_tree() {
        let tokens = tokenize("int x = 1 + 2.5;", "t.cj").unwrap().tokens;
        let program = Parser::new(tokens).parse_program().unwrap();
        let tree = render_tree(&program.arena, program.entry().unwrap());

        assert_eq!(
            tree,
            "Declaration: int x\n\
             \x20 Binary: +\n\
             \x20 Left operand:\n\
             \x20   Literal: int 1\n\
             \x20 Right operand:\n\
             \x20   Literal: float 2.5\n"
        );
    }

    #[test]
    fn test_unary_node_forms() {
        let mut arena = AstArena::new();
        let operand = arena
            .push(AstNode::Literal {
                raw: "3".to_string(),
                literal_type: LiteralType::Int,
                location: SourceLocation::new(1, 2),
            })
            .unwrap();
        let neg = arena
            .push(AstNode::Unary {
                op: UnOp::Neg,
                operand,
                location: SourceLocation::new(1, 1),
            })
            .unwrap();

        assert_eq!(to_sexpr(&arena, neg), "(- 3)");
        assert_eq!(render_tree(&arena, neg), "Unary: -\n  Literal: int 3\n");
    }
}
