//! Selectable-node index
//!
//! Flattened, reading-order list of the nodes that can take focus, with the
//! screen extent each one had in the most recent paint pass.

use alloc::vec::Vec;

use crate::document::{Document, NodeId};

/// A selectable node and its extent in document pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelectableEntry {
    /// Handle of the selectable node
    pub node: NodeId,
    /// Top edge, pixels from the document top
    pub top: usize,
    /// Bottom edge, pixels from the document top
    pub bottom: usize,
}

impl SelectableEntry {
    /// Create an entry with unknown extent
    pub const fn new(node: NodeId) -> Self {
        Self {
            node,
            top: 0,
            bottom: 0,
        }
    }

    /// Whether the whole entry lies inside the viewport window
    ///
    /// Both bounds are inclusive.
    pub fn is_visible(&self, scroll_height: usize, viewport_height: usize) -> bool {
        self.top >= scroll_height && self.bottom <= scroll_height + viewport_height
    }
}

/// Rebuild the index from scratch
///
/// Pre-order walk from the top-level nodes; a node is included iff its
/// selection flag is set, and children are visited regardless.
pub fn rebuild(doc: &Document) -> Vec<SelectableEntry> {
    doc.walk()
        .filter(|(_, node)| node.selectable)
        .map(|(id, _)| SelectableEntry::new(id))
        .collect()
}
