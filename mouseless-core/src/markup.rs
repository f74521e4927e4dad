//! Markup parser collaborator
//!
//! Turning 3ML text into node trees lives outside the core. Whatever parser
//! a board uses, page loads and script-driven `innerHTML` replacements go
//! through the same `parse_clean` path.

use alloc::vec::Vec;
use core::fmt;

use crate::document::NodeSpec;

/// Errors from parsing markup text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MarkupError {
    /// Input is not valid UTF-8
    InvalidEncoding,
    /// A tag was opened but never closed, or closed out of order
    Unbalanced,
    /// Tag syntax could not be read
    Malformed,
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupError::InvalidEncoding => f.write_str("markup is not valid UTF-8"),
            MarkupError::Unbalanced => f.write_str("unbalanced tags"),
            MarkupError::Malformed => f.write_str("malformed tag"),
        }
    }
}

/// Parser and tree-cleaner for 3ML markup
pub trait MarkupParser {
    /// Parse markup text into raw top-level trees
    fn parse(&self, source: &str) -> Result<Vec<NodeSpec>, MarkupError>;

    /// Apply the structural rules to one raw tree
    ///
    /// Cleaning wraps text, marks interactive nodes as selectable and moves
    /// element text into a leading text child.
    fn clean(&self, node: NodeSpec) -> NodeSpec;

    /// Parse, then clean every top-level tree
    fn parse_clean(&self, source: &str) -> Result<Vec<NodeSpec>, MarkupError> {
        Ok(self
            .parse(source)?
            .into_iter()
            .map(|node| self.clean(node))
            .collect())
    }

    /// Decode bytes read from storage and parse them
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<NodeSpec>, MarkupError> {
        let source = core::str::from_utf8(bytes).map_err(|_| MarkupError::InvalidEncoding)?;
        self.parse_clean(source)
    }
}

impl<P: MarkupParser + ?Sized> MarkupParser for &P {
    fn parse(&self, source: &str) -> Result<Vec<NodeSpec>, MarkupError> {
        (**self).parse(source)
    }

    fn clean(&self, node: NodeSpec) -> NodeSpec {
        (**self).clean(node)
    }
}
