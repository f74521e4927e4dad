//! Arena-backed document

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::node::{Node, NodeKind, NodeSpec};

/// Stable handle to a node in a `Document`
///
/// A handle whose slot was freed (the node was removed by a child
/// replacement) no longer resolves, even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// The in-memory tree of a loaded page
#[derive(Debug, Clone, Default)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    top_level: Vec<NodeId>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from cleaned top-level trees
    pub fn from_specs(specs: Vec<NodeSpec>) -> Self {
        let mut doc = Self::new();
        for spec in specs {
            let id = doc.insert(spec);
            doc.top_level.push(id);
        }
        doc
    }

    /// Top-level nodes in document order
    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    /// Resolve a handle
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Children of a node, empty for stale handles
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if the document has no nodes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text lines shown for a node
    ///
    /// Text-bearing elements carry their text either directly or in their
    /// first child (the cleaner wraps element text in a text run).
    pub fn text_lines(&self, id: NodeId) -> &[alloc::string::String] {
        let Some(node) = self.get(id) else {
            return &[];
        };
        if !node.lines.is_empty() {
            return &node.lines;
        }
        node.children
            .first()
            .and_then(|child| self.get(*child))
            .map(|child| child.lines.as_slice())
            .unwrap_or(&[])
    }

    /// The first top-level page root
    pub fn page_root(&self) -> Option<NodeId> {
        self.top_level
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|node| node.kind == NodeKind::Body))
    }

    /// Breadth-first search for the first node with the given identifier
    ///
    /// Shallower matches win when identifiers are duplicated.
    pub fn find_by_id(&self, query: &str) -> Option<NodeId> {
        let mut queue: VecDeque<NodeId> = self.top_level.iter().copied().collect();
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if node.id.as_deref() == Some(query) {
                return Some(id);
            }
            queue.extend(node.children.iter().copied());
        }
        None
    }

    /// Pre-order walk over every node reachable from the top level
    pub fn walk(&self) -> Walk<'_> {
        let mut stack: Vec<NodeId> = self.top_level.clone();
        stack.reverse();
        Walk { doc: self, stack }
    }

    /// Replace all children of `parent` with freshly inserted trees
    ///
    /// The old children and their subtrees are freed. Returns `false` if
    /// `parent` is stale.
    pub fn replace_children(&mut self, parent: NodeId, specs: Vec<NodeSpec>) -> bool {
        let Some(node) = self.get_mut(parent) else {
            return false;
        };
        let old = core::mem::take(&mut node.children);
        for child in old {
            self.remove_subtree(child);
        }

        let mut children = Vec::with_capacity(specs.len());
        for spec in specs {
            children.push(self.insert(spec));
        }
        if let Some(node) = self.get_mut(parent) {
            node.children = children;
        }
        true
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn insert(&mut self, spec: NodeSpec) -> NodeId {
        let NodeSpec {
            kind,
            id,
            attributes,
            children,
            selectable,
            lines,
        } = spec;

        let child_ids = children.into_iter().map(|child| self.insert(child)).collect();
        self.alloc(Node {
            kind,
            id,
            attributes,
            children: child_ids,
            selectable,
            lines,
        })
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn remove_subtree(&mut self, root: NodeId) {
        let mut pending = alloc::vec![root];
        while let Some(id) = pending.pop() {
            let Some(slot) = self
                .slots
                .get_mut(id.index as usize)
                .filter(|slot| slot.generation == id.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                pending.extend(node.children);
            }
        }
    }
}

/// Pre-order iterator over a document
pub struct Walk<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.doc.get(id) {
                self.stack.extend(node.children.iter().rev().copied());
                return Some((id, node));
            }
        }
        None
    }
}
