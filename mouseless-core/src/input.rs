//! Button input classification
//!
//! The input layer delivers debounced pressed/released transitions; the
//! tracker turns them into discrete press/release/click/hold events.

use heapless::Vec;

use crate::config::InputConfig;

/// Logical input buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Up / previous
    Prev,
    /// Down / next
    Next,
}

/// Kind of a discrete button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEventKind {
    /// Button went down
    Press,
    /// Button went up
    Release,
    /// Released before the hold threshold
    Click,
    /// Released after the hold threshold
    Hold,
}

/// A discrete event for one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub kind: ButtonEventKind,
}

impl ButtonEvent {
    pub const fn new(button: Button, kind: ButtonEventKind) -> Self {
        Self { button, kind }
    }

    pub const fn click(button: Button) -> Self {
        Self::new(button, ButtonEventKind::Click)
    }

    pub const fn hold(button: Button) -> Self {
        Self::new(button, ButtonEventKind::Hold)
    }
}

/// Events produced by a single transition (at most a classification and a release)
pub type TrackedEvents = Vec<ButtonEvent, 2>;

/// Press-duration classifier for one button
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTracker {
    button: Button,
    hold_threshold_ms: u64,
    pressed_at: Option<u64>,
}

impl ButtonTracker {
    /// Create a tracker with the default hold threshold
    pub fn new(button: Button) -> Self {
        Self::with_config(button, &InputConfig::default())
    }

    /// Create a tracker using the given input configuration
    pub fn with_config(button: Button, config: &InputConfig) -> Self {
        Self {
            button,
            hold_threshold_ms: config.hold_threshold_ms as u64,
            pressed_at: None,
        }
    }

    /// Button this tracker classifies
    pub fn button(&self) -> Button {
        self.button
    }

    /// Whether the button is currently held down
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Feed one debounced transition
    ///
    /// `now_ms` is a monotonic timestamp. A transition to the state the
    /// button is already in produces no events.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> TrackedEvents {
        let mut events = TrackedEvents::new();
        match (pressed, self.pressed_at) {
            (true, None) => {
                self.pressed_at = Some(now_ms);
                let _ = events.push(ButtonEvent::new(self.button, ButtonEventKind::Press));
            }
            (false, Some(since)) => {
                self.pressed_at = None;
                let kind = if now_ms.saturating_sub(since) >= self.hold_threshold_ms {
                    ButtonEventKind::Hold
                } else {
                    ButtonEventKind::Click
                };
                let _ = events.push(ButtonEvent::new(self.button, kind));
                let _ = events.push(ButtonEvent::new(self.button, ButtonEventKind::Release));
            }
            _ => {}
        }
        events
    }
}
