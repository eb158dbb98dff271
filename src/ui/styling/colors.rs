//! Color definitions for the status screen.
//!
//! The panel is driven in RGB565 even though the keyboard's OLED only shows
//! one color, so the same screen renders unchanged in the desktop simulator.
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Pure black - screen background and "pixel off"
pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Colors shared by all status screen elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Screen background
    pub background: Rgb565,

    /// Text and icon color
    pub text_primary: Rgb565,
}

impl Default for ColorPalette {
    /// White on black, matching the monochrome OLED
    fn default() -> Self {
        Self {
            background: BLACK,
            text_primary: WHITE,
        }
    }
}
