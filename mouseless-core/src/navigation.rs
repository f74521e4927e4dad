//! Navigation history and deferred page actions
//!
//! Input never loads pages or runs scripts directly. It records a reload
//! request or a pending callback here, and the render tick consumes it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::document::{Document, NodeId, NodeKind};

/// A page load to perform on the next render tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadRequest {
    /// File to load
    pub path: String,
    /// Back-navigation: the path is already on the history stack
    pub back: bool,
}

/// Action taken by the render tick before painting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Reload(ReloadRequest),
    Callback(String),
}

/// History stack and pending-action flags
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    history: Vec<String>,
    current_file: Option<String>,
    reload: Option<ReloadRequest>,
    callback: Option<String>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// History stack, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Path of the loaded page
    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    pub fn pending_reload(&self) -> Option<&ReloadRequest> {
        self.reload.as_ref()
    }

    /// Request a forward load of `path`
    pub fn request_load(&mut self, path: &str) {
        self.set_reload(ReloadRequest {
            path: String::from(path),
            back: false,
        });
    }

    /// Queue a script snippet for the current page
    pub fn request_callback(&mut self, source: &str) {
        self.callback = Some(String::from(source));
    }

    /// Activate the selected node
    ///
    /// Links request a load of their `href`, buttons queue their `onclick`.
    /// Anything else, or a missing attribute, does nothing.
    pub fn interact(&mut self, doc: &Document, selected: Option<NodeId>) {
        let Some(node) = selected.and_then(|id| doc.get(id)) else {
            return;
        };
        match node.kind {
            NodeKind::Link => {
                if let Some(href) = node.attr("href") {
                    self.request_load(href);
                }
            }
            NodeKind::Button => {
                if let Some(onclick) = node.attr("onclick") {
                    self.request_callback(onclick);
                }
            }
            _ => {}
        }
    }

    /// Return to the previous page
    ///
    /// No-op unless there is a page to go back to.
    pub fn go_back(&mut self) {
        if self.history.len() < 2 {
            return;
        }
        self.history.pop();
        if let Some(previous) = self.history.last() {
            let path = previous.clone();
            self.set_reload(ReloadRequest { path, back: true });
        }
    }

    /// Take the action for this tick; a reload wins over a callback
    pub fn take_action(&mut self) -> Option<PendingAction> {
        if let Some(reload) = self.reload.take() {
            self.callback = None;
            return Some(PendingAction::Reload(reload));
        }
        self.callback.take().map(PendingAction::Callback)
    }

    /// Record a completed load
    pub fn complete_load(&mut self, request: &ReloadRequest) {
        if !request.back {
            self.history.push(request.path.clone());
        }
        self.current_file = Some(request.path.clone());
    }

    fn set_reload(&mut self, request: ReloadRequest) {
        // A callback queued for the old page must not run on the new one
        self.callback = None;
        self.reload = Some(request);
    }
}
