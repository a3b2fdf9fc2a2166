//! Name tables filled in by the parser
//!
//! - [`DeclarationTable`]: declared name to its [`Declaration`]
//! - [`SymbolTable`]: declared name to the node that declared it

pub mod chained;

pub use chained::ChainedMap;

use crate::parser::ast::{LiteralType, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Variable,
    Function,
}

/// What the parser learned about a declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub literal_type: LiteralType,
}

impl Declaration {
    pub fn variable(literal_type: LiteralType) -> Self {
        Self {
            kind: DeclarationKind::Variable,
            literal_type,
        }
    }
}

pub type DeclarationTable = ChainedMap<Declaration>;

pub type SymbolTable = ChainedMap<NodeId>;
