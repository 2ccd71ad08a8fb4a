//! Domain model: the document tree handed over by a provider, and the
//! comparison strategy that decides how its records are keyed.

pub mod strategy;
pub mod tree;

pub use strategy::Strategy;
pub use tree::{
    DocumentTree, EntryNode, GroupNode, Node, NodeData, NodeId, NodeKind, StringField,
};
