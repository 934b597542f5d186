//! Live node arena: slotmap-backed tree with ordered children.

pub mod node;
pub mod tree;

pub use node::{ElementData, NodeContent, NodeId};
pub use tree::Dom;
