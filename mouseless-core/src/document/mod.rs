//! Document model
//!
//! A document is an arena of nodes. Nodes reference their children by
//! `NodeId` handles; the arena is the only owner of node storage.

mod arena;
mod node;

pub use arena::{Document, NodeId};
pub use node::{Node, NodeKind, NodeSpec};
