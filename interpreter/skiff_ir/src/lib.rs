//! Shared program representation for the Skiff interpreter.
//!
//! Everything the pipeline phases exchange lives here: interned names and
//! the string table ([`StringInterner`]), the token model ([`Token`],
//! [`TokenList`]), operators, and the arena-allocated syntax tree
//! ([`SyntaxTree`], [`Node`], [`NodeId`]).

mod ast;
mod interner;
mod operators;
mod token;

pub use ast::{Node, NodeId, NodeKind, NodeRange, SyntaxTree};
pub use interner::{Name, SharedInterner, StringInterner};
pub use operators::{BinaryOp, UnaryOp};
pub use token::{Token, TokenKind, TokenList};
