//! Configuration types
//!
//! Defaults match the wearable's 320x170 panel.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum status-bar label length
pub const MAX_TITLE_LEN: usize = 24;

/// Renderer geometry and behavior
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RendererConfig {
    /// Panel width in pixels
    pub viewport_width: u16,
    /// Panel height in pixels, status bar included
    pub viewport_height: u16,
    /// Height of the fixed status bar at the top of the panel
    pub status_bar_height: u16,
    /// Scroll nudge when selection cannot move (pixels)
    pub scroll_step: u16,
    /// Status-bar label for pages without a title
    pub default_title: String<MAX_TITLE_LEN>,
}

impl RendererConfig {
    /// Height of the scrollable body area below the status bar
    pub fn body_height(&self) -> u16 {
        self.viewport_height.saturating_sub(self.status_bar_height)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        let mut default_title = String::new();
        let _ = default_title.push_str("3ML");
        Self {
            viewport_width: 320,
            viewport_height: 170,
            status_bar_height: 20,
            scroll_step: 40,
            default_title,
        }
    }
}

/// Input classification settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Minimum press duration reported as a hold (ms)
    pub hold_threshold_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hold_threshold_ms: 500,
        }
    }
}
