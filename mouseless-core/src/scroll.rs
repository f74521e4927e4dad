//! Scroll and selection state machine
//!
//! Reconciles three values:
//! - `scroll_height`: the displayed, smoothed scroll offset
//! - `scroll_target`: the desired offset, changed instantly by navigation
//! - `current_selected`: the focused entry of the selectable-node index
//!
//! `total_height` is a high-water mark of the layout extent. It is only
//! exact after one complete pass over the current document and never
//! decreases until the next reset.

use crate::config::RendererConfig;
use crate::document::NodeId;
use crate::selection::SelectableEntry;

/// One smoothing step: a first-order low-pass filter with gain 1/4
///
/// Integer arithmetic rounded toward the target, so the filter reaches the
/// target exactly and never overshoots it.
pub fn smooth_step(height: usize, target: usize) -> usize {
    if height > target {
        (height * 3 + target) / 4
    } else if height < target {
        (height * 3 + target + 3) / 4
    } else {
        height
    }
}

/// Scroll/selection state for one loaded document
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    scroll_height: usize,
    // Signed so nudges above the top clamp instead of wrapping
    scroll_target: i64,
    current_selected: Option<usize>,
    total_height: usize,
    has_rendered: bool,
    viewport_height: usize,
    scroll_step: usize,
}

impl ScrollState {
    /// Create a new state for a viewport of the given height
    pub const fn new(viewport_height: usize, scroll_step: usize) -> Self {
        Self {
            scroll_height: 0,
            scroll_target: 0,
            current_selected: None,
            total_height: 0,
            has_rendered: false,
            viewport_height,
            scroll_step,
        }
    }

    /// Create a state from renderer configuration
    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(config.body_height() as usize, config.scroll_step as usize)
    }

    /// Displayed scroll offset
    pub fn scroll_height(&self) -> usize {
        self.scroll_height
    }

    /// Desired scroll offset
    pub fn scroll_target(&self) -> i64 {
        self.scroll_target
    }

    /// Index of the focused entry, `None` before the first selection
    pub fn current_selected(&self) -> Option<usize> {
        self.current_selected
    }

    /// High-water mark of the document height
    pub fn total_height(&self) -> usize {
        self.total_height
    }

    /// Whether a full layout of the current document has completed
    pub fn has_rendered(&self) -> bool {
        self.has_rendered
    }

    /// Viewport height (excludes the status bar)
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Largest valid scroll offset with the current height knowledge
    pub fn max_scroll(&self) -> usize {
        self.total_height.saturating_sub(self.viewport_height)
    }

    /// Document offset of the bottom edge of the viewport
    pub fn viewport_bottom(&self) -> usize {
        self.scroll_height + self.viewport_height
    }

    /// Handle of the focused node
    pub fn selected_node(&self, entries: &[SelectableEntry]) -> Option<NodeId> {
        let index = self.current_selected?;
        debug_assert!(index < entries.len(), "selection index out of range");
        entries.get(index).map(|entry| entry.node)
    }

    /// Keep the target inside `[0, max(0, total_height - viewport_height)]`
    pub fn clamp_target(&mut self) {
        if self.scroll_target < 0 || self.total_height <= self.viewport_height {
            self.scroll_target = 0;
        } else if self.scroll_target > self.max_scroll() as i64 {
            self.scroll_target = self.max_scroll() as i64;
        }
    }

    /// Move focus forward, or scroll down a step past the last entry
    pub fn select_next(&mut self, entries: &[SelectableEntry]) {
        let next = match self.current_selected {
            None if !entries.is_empty() => 0,
            Some(index) if index + 1 < entries.len() => index + 1,
            _ => {
                self.nudge(self.scroll_step as i64);
                return;
            }
        };
        self.focus(entries, next);
    }

    /// Move focus backward, or scroll up a step before the first entry
    pub fn select_prev(&mut self, entries: &[SelectableEntry]) {
        match self.current_selected {
            Some(index) if index > 0 && index - 1 < entries.len() => {
                self.focus(entries, index - 1);
            }
            _ => self.nudge(-(self.scroll_step as i64)),
        }
    }

    /// Per-frame reconciliation, applied before a paint pass
    ///
    /// Nothing moves until the document has been laid out once.
    pub fn begin_frame(&mut self) {
        if !self.has_rendered {
            return;
        }
        self.clamp_target();
        // clamp_target leaves the target non-negative
        self.scroll_height = smooth_step(self.scroll_height, self.scroll_target as usize);
    }

    /// Record the extent reached by a paint pass
    pub fn finish_layout(&mut self, end_position: usize) {
        self.total_height = self.total_height.max(end_position);
        self.has_rendered = true;
    }

    /// Forget everything about the previous document
    pub fn reset(&mut self) {
        *self = Self::new(self.viewport_height, self.scroll_step);
    }

    /// Forget layout knowledge after the current document changed in place
    ///
    /// Scroll position is kept. `kept` is the new index of the focused node
    /// if it survived the change; otherwise the old index is clamped into
    /// the new list.
    pub fn reset_layout(&mut self, selectable_len: usize, kept: Option<usize>) {
        self.total_height = 0;
        self.has_rendered = false;
        self.current_selected = match (self.current_selected, kept) {
            (None, _) => None,
            (Some(_), Some(index)) if index < selectable_len => Some(index),
            (Some(_), _) if selectable_len == 0 => None,
            (Some(index), _) => Some(index.min(selectable_len - 1)),
        };
    }

    fn focus(&mut self, entries: &[SelectableEntry], index: usize) {
        self.current_selected = Some(index);
        let entry = entries[index];
        if !entry.is_visible(self.scroll_height, self.viewport_height) {
            self.scroll_target = entry.top as i64;
            self.clamp_target();
        }
    }

    fn nudge(&mut self, delta: i64) {
        self.scroll_target += delta;
        self.clamp_target();
    }
}
