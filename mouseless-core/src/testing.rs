//! Host-side collaborators for tests
//!
//! `TagParser` reads a small tag syntax:
//!
//! ```text
//! <head><title>Home</title><script src="/app.js"/></head>
//! <body onload="init()"><h1>Hello</h1><a href="/next.3ml">Next</a></body>
//! ```
//!
//! Attribute values are double-quoted, text between tags is collapsed to
//! single spaces, and only the known 3ML tags are accepted.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::document::{NodeKind, NodeSpec};
use crate::markup::{MarkupError, MarkupParser};
use crate::traits::{Storage, StorageError};

/// Characters per line at text size 2 on the 320px panel
pub const WRAP_WIDTH: usize = 26;

/// Minimal parser and cleaner for the tag syntax above
#[derive(Debug, Clone, Copy)]
pub struct TagParser {
    wrap_width: usize,
}

impl TagParser {
    pub const fn new() -> Self {
        Self {
            wrap_width: WRAP_WIDTH,
        }
    }

    pub const fn with_wrap_width(wrap_width: usize) -> Self {
        Self { wrap_width }
    }
}

impl Default for TagParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser for TagParser {
    fn parse(&self, source: &str) -> Result<Vec<NodeSpec>, MarkupError> {
        let mut open: Vec<NodeSpec> = Vec::new();
        let mut top_level = Vec::new();
        let mut rest = source;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('<') {
                let end = tag_end(after).ok_or(MarkupError::Malformed)?;
                let tag = &after[..end];
                rest = &after[end + 1..];

                if let Some(name) = tag.strip_prefix('/') {
                    let node = open.pop().ok_or(MarkupError::Unbalanced)?;
                    if NodeKind::from_tag(name.trim()) != Some(node.kind) {
                        return Err(MarkupError::Unbalanced);
                    }
                    attach(&mut open, &mut top_level, node);
                } else if let Some(tag) = tag.strip_suffix('/') {
                    attach(&mut open, &mut top_level, open_tag(tag)?);
                } else {
                    open.push(open_tag(tag)?);
                }
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                let text = collapse_whitespace(&rest[..end]);
                if !text.is_empty() {
                    attach(&mut open, &mut top_level, NodeSpec::text([text]));
                }
                rest = &rest[end..];
            }
        }

        if open.is_empty() {
            Ok(top_level)
        } else {
            Err(MarkupError::Unbalanced)
        }
    }

    fn clean(&self, mut node: NodeSpec) -> NodeSpec {
        if node.kind == NodeKind::Text {
            let joined = node.lines.join(" ");
            node.lines = wrap(&joined, self.wrap_width);
            return node;
        }

        node.children = node
            .children
            .into_iter()
            .map(|child| self.clean(child))
            .collect();
        if node.kind.is_interactive() {
            node.selectable = true;
        }
        let text_bearing = matches!(
            node.kind,
            NodeKind::Link | NodeKind::Button | NodeKind::Heading | NodeKind::Title
        );
        let has_text_child = node
            .children
            .first()
            .is_some_and(|child| child.kind == NodeKind::Text);
        if text_bearing && !has_text_child {
            node.children.insert(0, NodeSpec::new(NodeKind::Text));
        }
        node
    }
}

/// Index of the `>` closing a tag, ignoring any inside quoted values
fn tag_end(source: &str) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in source.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '>' if !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

fn open_tag(tag: &str) -> Result<NodeSpec, MarkupError> {
    let tag = tag.trim();
    let name_end = tag.find(char::is_whitespace).unwrap_or(tag.len());
    let kind = NodeKind::from_tag(&tag[..name_end]).ok_or(MarkupError::Malformed)?;
    let mut node = NodeSpec::new(kind);

    let mut rest = tag[name_end..].trim_start();
    while !rest.is_empty() {
        let eq = rest.find('=').ok_or(MarkupError::Malformed)?;
        let name = rest[..eq].trim();
        let value = rest[eq + 1..]
            .trim_start()
            .strip_prefix('"')
            .ok_or(MarkupError::Malformed)?;
        let close = value.find('"').ok_or(MarkupError::Malformed)?;
        node = node.with_attr(name, &value[..close]);
        rest = value[close + 1..].trim_start();
    }
    Ok(node)
}

fn attach(open: &mut [NodeSpec], top_level: &mut Vec<NodeSpec>, node: NodeSpec) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top_level.push(node),
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::new();
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Greedy word wrap; words longer than a line are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let word_len = word.chars().count();
            let needed = if line_len == 0 { word_len } else { line_len + 1 + word_len };
            if needed <= width {
                if line_len > 0 {
                    line.push(' ');
                }
                line.push_str(word);
                line_len = needed;
                break;
            }
            if line_len > 0 {
                lines.push(core::mem::take(&mut line));
                line_len = 0;
                continue;
            }
            // Word alone does not fit
            let split = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(String::from(&word[..split]));
            word = &word[split..];
            if word.is_empty() {
                break;
            }
        }
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// In-memory storage keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: &str, contents: impl AsRef<[u8]>) {
        self.files
            .insert(String::from(normalize(path)), contents.as_ref().to_vec());
    }
}

impl Storage for MemoryStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.files
            .get(normalize(path))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(normalize(path))
    }
}

fn normalize(path: &str) -> &str {
    path.trim_start_matches('/')
}
