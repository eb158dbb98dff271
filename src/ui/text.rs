//! Font presets for labels

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::prelude::Size;

/// Text size variants
///
/// - `Medium`: 6x10 font (default), used for the top bar
/// - `Large`: 10x20 font, used for the time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    #[default]
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        }
    }

    /// Bounding box of a single line of `text` in this font.
    pub fn measure(&self, text: &str) -> Size {
        let font = self.font();
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return Size::new(0, font.character_size.height);
        }

        let width = chars * font.character_size.width + (chars - 1) * font.character_spacing;
        Size::new(width, font.character_size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_uses_font_cell_size() {
        assert_eq!(TextSize::Medium.measure("12:34"), Size::new(30, 10));
        assert_eq!(TextSize::Large.measure("12:34"), Size::new(50, 20));
    }

    #[test]
    fn test_measure_empty_text_keeps_line_height() {
        assert_eq!(TextSize::Medium.measure(""), Size::new(0, 10));
    }
}
