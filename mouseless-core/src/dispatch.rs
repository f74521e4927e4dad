//! Interaction dispatcher
//!
//! Maps discrete button events to selection, activation and back
//! navigation. Owns the state those events may touch.

use alloc::vec::Vec;

use crate::config::RendererConfig;
use crate::document::{Document, NodeId};
use crate::input::{Button, ButtonEvent, ButtonEventKind};
use crate::navigation::Navigation;
use crate::scroll::ScrollState;
use crate::selection::{self, SelectableEntry};

/// Action bound to a button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    SelectPrev,
    SelectNext,
    /// Activate the selected link or button
    Interact,
    GoBack,
}

impl Command {
    /// Fixed button bindings
    ///
    /// Press and release events are not bound.
    pub fn from_event(event: ButtonEvent) -> Option<Self> {
        match (event.button, event.kind) {
            (Button::Prev, ButtonEventKind::Click) => Some(Command::SelectPrev),
            (Button::Next, ButtonEventKind::Click) => Some(Command::SelectNext),
            (Button::Next, ButtonEventKind::Hold) => Some(Command::Interact),
            (Button::Prev, ButtonEventKind::Hold) => Some(Command::GoBack),
            _ => None,
        }
    }
}

/// Selection, scroll and navigation state of the loaded page
#[derive(Debug, Clone)]
pub struct Dispatcher {
    scroll: ScrollState,
    navigation: Navigation,
    entries: Vec<SelectableEntry>,
}

impl Dispatcher {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            scroll: ScrollState::from_config(config),
            navigation: Navigation::new(),
            entries: Vec::new(),
        }
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut Navigation {
        &mut self.navigation
    }

    /// Selectable-node index of the loaded page
    pub fn entries(&self) -> &[SelectableEntry] {
        &self.entries
    }

    /// Handle of the focused node
    pub fn selected_node(&self) -> Option<NodeId> {
        self.scroll.selected_node(&self.entries)
    }

    /// State for a freshly loaded document
    pub fn reset_for_load(&mut self, doc: &Document) {
        self.entries = selection::rebuild(doc);
        self.scroll.reset();
    }

    /// State after the current document changed in place
    ///
    /// The focused node keeps focus if it is still in the document.
    pub fn refresh(&mut self, doc: &Document) {
        let focused = self.selected_node();
        self.entries = selection::rebuild(doc);
        let kept = focused.and_then(|node| self.entries.iter().position(|entry| entry.node == node));
        self.scroll.reset_layout(self.entries.len(), kept);
    }

    /// Split borrow for the paint pass
    pub fn layout_parts(&mut self) -> (&mut ScrollState, &mut [SelectableEntry]) {
        (&mut self.scroll, &mut self.entries)
    }

    /// Handle one button event, returning the command it triggered
    pub fn process_input(&mut self, event: ButtonEvent, doc: &Document) -> Option<Command> {
        let command = Command::from_event(event)?;
        self.apply(command, doc);
        Some(command)
    }

    pub fn apply(&mut self, command: Command, doc: &Document) {
        match command {
            Command::SelectPrev => self.scroll.select_prev(&self.entries),
            Command::SelectNext => self.scroll.select_next(&self.entries),
            Command::Interact => {
                let selected = self.selected_node();
                self.navigation.interact(doc, selected);
            }
            Command::GoBack => self.navigation.go_back(),
        }
    }
}
