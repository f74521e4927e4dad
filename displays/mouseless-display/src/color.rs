//! RGB565 colors

/// A 16-bit RGB565 color as the panel expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Pack 8-bit channels into RGB565
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3))
    }

    /// Raw 16-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Status bar background and highlighted elements
pub const ACCENT_COLOR: Rgb565 = Rgb565::rgb(247, 176, 91);

/// Body text
pub const TEXT_COLOR: Rgb565 = Rgb565::rgb(255, 255, 255);

/// Page background
pub const BACKGROUND_COLOR: Rgb565 = Rgb565::rgb(31, 19, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_packing() {
        assert_eq!(Rgb565::rgb(255, 255, 255).raw(), 0xFFFF);
        assert_eq!(Rgb565::rgb(0, 0, 0).raw(), 0x0000);
        assert_eq!(Rgb565::rgb(255, 0, 0).raw(), 0xF800);
        assert_eq!(Rgb565::rgb(0, 255, 0).raw(), 0x07E0);
        assert_eq!(Rgb565::rgb(0, 0, 255).raw(), 0x001F);
    }

    #[test]
    fn test_palette_is_distinct() {
        assert_ne!(ACCENT_COLOR, BACKGROUND_COLOR);
        assert_ne!(TEXT_COLOR, ACCENT_COLOR);
    }
}
