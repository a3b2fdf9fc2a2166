// AST (Abstract Syntax Tree) definitions for the cjit front end

use crate::diagnostics::FatalError;
use std::fmt;
use std::ops::Index;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Literal type tag shared by literals and declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    Int,
    Float,
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::Int => write!(f, "int"),
            LiteralType::Float => write!(f, "float"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        };
        f.write_str(symbol)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus, // +x
    Neg,  // -x
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Plus => f.write_str("+"),
            UnOp::Neg => f.write_str("-"),
        }
    }
}

/// Index of a node inside an [`AstArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// AST nodes. Children are referenced by [`NodeId`], never by pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Literal {
        raw: String,
        literal_type: LiteralType,
        location: SourceLocation,
    },
    Binary {
        op: BinOp,
        left: NodeId,
        right: NodeId,
        location: SourceLocation,
    },
    Unary {
        op: UnOp,
        operand: NodeId,
        location: SourceLocation,
    },
    VariableDeclaration {
        name: String,
        literal_type: LiteralType,
        initializer: NodeId,
        location: SourceLocation,
    },
    Assignment {
        name: String,
        initializer: NodeId,
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            AstNode::Literal { location, .. } => location,
            AstNode::Binary { location, .. } => location,
            AstNode::Unary { location, .. } => location,
            AstNode::VariableDeclaration { location, .. } => location,
            AstNode::Assignment { location, .. } => location,
        }
    }

    /// Nodes referenced by this node, in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            AstNode::Literal { .. } => Vec::new(),
            AstNode::Binary { left, right, .. } => vec![*left, *right],
            AstNode::Unary { operand, .. } => vec![*operand],
            AstNode::VariableDeclaration { initializer, .. }
            | AstNode::Assignment { initializer, .. } => vec![*initializer],
        }
    }
}

/// Append-only node store.
///
/// A node may only reference nodes that were pushed before it, so every
/// child index is below the arena length at the time of the push.
#[derive(Debug, Clone, Default)]
pub struct AstArena {
    nodes: Vec<AstNode>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its index.
    pub fn push(&mut self, node: AstNode) -> Result<NodeId, FatalError> {
        debug_assert!(
            node.children().iter().all(|child| child.0 < self.nodes.len()),
            "node references an index that is not in the arena yet: {:?}",
            node
        );
        self.nodes
            .try_reserve(1)
            .map_err(|source| FatalError::Allocation {
                what: "AST arena",
                source,
            })?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &AstNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i), node))
    }
}

impl Index<NodeId> for AstArena {
    type Output = AstNode;

    fn index(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.0]
    }
}
