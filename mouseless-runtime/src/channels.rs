//! Input channel between the button context and the render task
//!
//! The button context only ever publishes events; the render task drains the
//! channel once per tick. Publishing never blocks: when the channel is full
//! the event is dropped.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use tracing::debug;

use mouseless_core::config::InputConfig;
use mouseless_core::input::{Button, ButtonEvent, ButtonTracker};

/// Channel capacity for button events
pub const INPUT_CHANNEL_SIZE: usize = 8;

/// Bounded channel carrying classified button events
pub type InputChannel = Channel<CriticalSectionRawMutex, ButtonEvent, INPUT_CHANNEL_SIZE>;

/// Button events for the render task
pub static INPUT_CHANNEL: InputChannel = Channel::new();

/// Publish an event without blocking
///
/// Returns `false` if the channel was full and the event was dropped.
pub fn publish(channel: &InputChannel, event: ButtonEvent) -> bool {
    match channel.try_send(event) {
        Ok(()) => true,
        Err(_) => {
            debug!(?event, "input channel full, event dropped");
            false
        }
    }
}

/// Classifies debounced transitions of both buttons and publishes the result
pub struct ButtonInput {
    prev: ButtonTracker,
    next: ButtonTracker,
    channel: &'static InputChannel,
}

impl ButtonInput {
    pub fn new(channel: &'static InputChannel, config: &InputConfig) -> Self {
        Self {
            prev: ButtonTracker::with_config(Button::Prev, config),
            next: ButtonTracker::with_config(Button::Next, config),
            channel,
        }
    }

    /// Feed one debounced transition
    ///
    /// Returns the number of events published.
    pub fn transition(&mut self, button: Button, pressed: bool, now_ms: u64) -> usize {
        let tracker = match button {
            Button::Prev => &mut self.prev,
            Button::Next => &mut self.next,
        };
        tracker
            .update(pressed, now_ms)
            .into_iter()
            .filter(|event| publish(self.channel, *event))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mouseless_core::input::ButtonEventKind;

    fn drain(channel: &InputChannel) -> Vec<ButtonEvent> {
        let mut events = Vec::new();
        while let Ok(event) = channel.try_receive() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_publish_drops_when_full() {
        static CHANNEL: InputChannel = Channel::new();
        let event = ButtonEvent::click(Button::Next);
        for _ in 0..INPUT_CHANNEL_SIZE {
            assert!(publish(&CHANNEL, event));
        }
        assert!(!publish(&CHANNEL, event));
        assert_eq!(drain(&CHANNEL).len(), INPUT_CHANNEL_SIZE);
    }

    #[test]
    fn test_button_input_publishes_classified_events() {
        static CHANNEL: InputChannel = Channel::new();
        let mut input = ButtonInput::new(&CHANNEL, &InputConfig::default());

        assert_eq!(input.transition(Button::Next, true, 0), 1);
        assert_eq!(input.transition(Button::Next, false, 80), 2);
        input.transition(Button::Prev, true, 100);
        input.transition(Button::Prev, false, 900);

        let kinds: Vec<(Button, ButtonEventKind)> = drain(&CHANNEL)
            .into_iter()
            .map(|event| (event.button, event.kind))
            .collect();
        assert_eq!(
            kinds,
            [
                (Button::Next, ButtonEventKind::Press),
                (Button::Next, ButtonEventKind::Click),
                (Button::Next, ButtonEventKind::Release),
                (Button::Prev, ButtonEventKind::Press),
                (Button::Prev, ButtonEventKind::Hold),
                (Button::Prev, ButtonEventKind::Release),
            ]
        );
    }
}
