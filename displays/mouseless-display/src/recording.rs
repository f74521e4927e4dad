//! Recording backend
//!
//! Keeps the draw operations of the current frame in memory. A frame starts
//! at `fill_screen` and ends at `flush`.

use alloc::string::String;
use alloc::vec::Vec;

use crate::backend::{DisplayError, PixelDisplay, TextStyle};
use crate::color::Rgb565;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    FillScreen(Rgb565),
    FillRect {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        color: Rgb565,
    },
    HLine {
        x: i32,
        y: i32,
        length: u16,
        color: Rgb565,
    },
    VLine {
        x: i32,
        y: i32,
        length: u16,
        color: Rgb565,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        style: TextStyle,
    },
}

/// In-memory display that records what was drawn
#[derive(Debug, Clone)]
pub struct RecordingDisplay {
    width: u16,
    height: u16,
    ops: Vec<DrawOp>,
    frames: u32,
    ready: bool,
}

impl RecordingDisplay {
    /// Create a new recording display with the given panel size
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            frames: 0,
            ready: true,
        }
    }

    /// Operations recorded since the last `fill_screen`
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of completed frames
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Simulate a transfer in flight (or completed)
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// All text drawn in the current frame, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Find the first text operation with this exact content
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

impl PixelDisplay for RecordingDisplay {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.ops.clear();
        self.ops.push(DrawOp::FillScreen(color));
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn draw_hline(
        &mut self,
        x: i32,
        y: i32,
        length: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::HLine {
            x,
            y,
            length,
            color,
        });
        Ok(())
    }

    fn draw_vline(
        &mut self,
        x: i32,
        y: i32,
        length: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::VLine {
            x,
            y,
            length,
            color,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: String::from(text),
            style,
        });
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::Busy);
        }
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BACKGROUND_COLOR, TEXT_COLOR};

    #[test]
    fn test_fill_screen_starts_frame() {
        let mut display = RecordingDisplay::new(320, 170);
        let style = TextStyle::new(TEXT_COLOR, BACKGROUND_COLOR, 2);

        display.draw_text(0, 0, "old", style).unwrap();
        display.fill_screen(BACKGROUND_COLOR).unwrap();
        display.draw_text(0, 0, "new", style).unwrap();

        assert_eq!(display.texts().count(), 1);
        assert!(display.find_text("new").is_some());
        assert!(display.find_text("old").is_none());
    }

    #[test]
    fn test_flush_while_busy() {
        let mut display = RecordingDisplay::new(320, 170);
        display.set_ready(false);
        assert_eq!(display.flush(), Err(DisplayError::Busy));
        display.set_ready(true);
        assert!(display.flush().is_ok());
        assert_eq!(display.frames(), 1);
    }

    #[test]
    fn test_glyph_metrics() {
        let style = TextStyle::new(TEXT_COLOR, BACKGROUND_COLOR, 2);
        assert_eq!(style.glyph_width(), 12);
        assert_eq!(style.glyph_height(), 16);
        let heading = TextStyle::new(TEXT_COLOR, BACKGROUND_COLOR, 3);
        assert_eq!(heading.glyph_height(), 24);
    }
}
