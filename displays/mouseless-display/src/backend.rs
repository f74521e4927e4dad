//! Display backend trait
//!
//! Defines the interface the renderer draws through.

use crate::color::Rgb565;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// A transfer is still in flight
    Busy,
}

/// Text rendering parameters
///
/// `size` is the integer scale of the built-in 6x8 font, so size 2 draws
/// 12x16 pixel cells and size 3 draws 18x24 pixel cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    /// Glyph color
    pub fg: Rgb565,
    /// Cell background color
    pub bg: Rgb565,
    /// Font scale
    pub size: u8,
}

impl TextStyle {
    /// Base font cell width in pixels
    pub const BASE_WIDTH: u16 = 6;
    /// Base font cell height in pixels
    pub const BASE_HEIGHT: u16 = 8;

    /// Create a new text style
    pub const fn new(fg: Rgb565, bg: Rgb565, size: u8) -> Self {
        Self { fg, bg, size }
    }

    /// Width of one character cell
    pub const fn glyph_width(&self) -> u16 {
        Self::BASE_WIDTH * self.size as u16
    }

    /// Height of one character cell
    pub const fn glyph_height(&self) -> u16 {
        Self::BASE_HEIGHT * self.size as u16
    }
}

/// Pixel display trait
///
/// Coordinates are signed so that content scrolled above the top edge can be
/// issued without wrapping; implementations clip.
pub trait PixelDisplay {
    /// Panel width in pixels
    fn width(&self) -> u16;

    /// Panel height in pixels
    fn height(&self) -> u16;

    /// Fill the whole frame with a color
    fn fill_screen(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Draw a horizontal line
    fn draw_hline(&mut self, x: i32, y: i32, length: u16, color: Rgb565)
        -> Result<(), DisplayError>;

    /// Draw a vertical line
    fn draw_vline(&mut self, x: i32, y: i32, length: u16, color: Rgb565)
        -> Result<(), DisplayError>;

    /// Draw a single line of text with its top-left corner at (x, y)
    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: TextStyle)
        -> Result<(), DisplayError>;

    /// Whether the previous frame transfer has completed
    fn is_ready(&self) -> bool;

    /// Start transferring the frame buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
