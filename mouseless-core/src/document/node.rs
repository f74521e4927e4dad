//! Node types

use alloc::string::String;
use alloc::vec::Vec;

use super::NodeId;

/// Kind of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeKind {
    /// Run of pre-wrapped plain text
    Text,
    /// Large heading
    Heading,
    /// Link to another page (`href`)
    Link,
    /// Button running a script snippet (`onclick`)
    Button,
    /// Generic container/section
    Container,
    /// Page root (`onload`, `onunload`)
    Body,
    /// Metadata section holding scripts and the title
    Head,
    /// External script reference (`src`)
    Script,
    /// Page title shown in the status bar
    Title,
}

impl NodeKind {
    /// Map a markup tag name to a node kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "h1" => NodeKind::Heading,
            "a" => NodeKind::Link,
            "button" => NodeKind::Button,
            "div" => NodeKind::Container,
            "body" => NodeKind::Body,
            "head" => NodeKind::Head,
            "script" => NodeKind::Script,
            "title" => NodeKind::Title,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether layout recurses into this node's children
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Container | NodeKind::Body)
    }

    /// Whether nodes of this kind take part in selection by default
    pub fn is_interactive(&self) -> bool {
        matches!(self, NodeKind::Link | NodeKind::Button)
    }
}

/// A node stored in a `Document`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node kind
    pub kind: NodeKind,
    /// `id` attribute, if any
    pub id: Option<String>,
    /// Attributes in markup order; lookups use the first match
    pub attributes: Vec<(String, String)>,
    /// Child handles in document order
    pub children: Vec<NodeId>,
    /// Whether the node participates in selection
    pub selectable: bool,
    /// Pre-wrapped text lines (text-bearing kinds only)
    pub lines: Vec<String>,
}

impl Node {
    /// First value of the named attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An owned, cleaned node tree handed over by the markup collaborator
///
/// This is the only form in which nodes enter a `Document`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub id: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<NodeSpec>,
    pub selectable: bool,
    pub lines: Vec<String>,
}

impl NodeSpec {
    /// Create a bare node of the given kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            attributes: Vec::new(),
            children: Vec::new(),
            selectable: false,
            lines: Vec::new(),
        }
    }

    /// A plain-text run with the given lines
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(NodeKind::Text).with_lines(lines)
    }

    /// Append an attribute; an `id` attribute also sets the identifier
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        if name == "id" && self.id.is_none() {
            self.id = Some(String::from(value));
        }
        self.attributes.push((String::from(name), String::from(value)));
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Replace the text lines
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the node as selectable
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }
}
