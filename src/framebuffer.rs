//! RAM frame buffer with changed-pixel tracking.
//!
//! The canvas draws into this buffer; afterwards only the bounding box of the
//! pixels that actually changed is pushed to the panel, in one
//! `fill_contiguous` call. On an I2C OLED a full 128x64 frame is the slow
//! path, and a ticking clock usually changes one digit.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use crate::ui::BLACK;

/// Bounding box of pixels changed since the last flush, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Off-screen `DrawTarget` mirroring the panel contents.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl Default for FrameBuffer {
    /// Buffer sized for the keyboard's OLED
    fn default() -> Self {
        Self::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX))
    }
}

impl FrameBuffer {
    /// Allocate a black buffer of `size`.
    ///
    /// The panel is assumed to power up black, so nothing is dirty yet.
    pub fn new(size: Size) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;
        Self {
            width,
            height,
            pixels: vec![BLACK; width * height],
            dirty: None,
        }
    }

    /// Region that the next [`flush`](Self::flush) will send, if any.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(DirtyRect::to_rectangle)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    /// Color at `point`, `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let (x, y) = self.index_of(point)?;
        Some(self.pixels[y * self.width + x])
    }

    /// Mark the whole buffer for the next flush, e.g. after the panel was reset.
    pub fn invalidate(&mut self) {
        if self.width > 0 && self.height > 0 {
            self.dirty = Some(DirtyRect {
                min_x: 0,
                min_y: 0,
                max_x: self.width - 1,
                max_y: self.height - 1,
            });
        }
    }

    /// Send the changed region to `display` and reset change tracking.
    ///
    /// Does nothing when no pixel changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };

        let area = rect.to_rectangle();
        debug!(
            "Flushing {}x{} region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let row_len = rect.max_x - rect.min_x + 1;
        let colors = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let start = y * stride + rect.min_x;
            pixels[start..start + row_len].iter().copied()
        });

        display.fill_contiguous(&area, colors)
    }

    fn index_of(&self, point: Point) -> Option<(usize, usize)> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = self.index_of(point) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let visible = area.intersection(&self.bounding_box());
        let Some(bottom_right) = visible.bottom_right() else {
            return Ok(());
        };

        for y in visible.top_left.y..=bottom_right.y {
            for x in visible.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::WHITE;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_new_buffer_is_clean() {
        let fb = FrameBuffer::default();
        assert!(!fb.is_dirty());
        assert_eq!(fb.size(), Size::new(128, 64));
        assert_eq!(fb.pixel(Point::new(127, 63)), Some(BLACK));
        assert_eq!(fb.pixel(Point::new(128, 0)), None);
    }

    #[test]
    fn test_same_color_write_stays_clean() {
        let mut fb = FrameBuffer::default();
        Pixel(Point::new(3, 3), BLACK).draw(&mut fb).unwrap();
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_dirty_area_bounds_changed_pixels() {
        let mut fb = FrameBuffer::default();
        Pixel(Point::new(2, 5), WHITE).draw(&mut fb).unwrap();
        Pixel(Point::new(7, 1), WHITE).draw(&mut fb).unwrap();

        assert_eq!(
            fb.dirty_area(),
            Some(Rectangle::new(Point::new(2, 1), Size::new(6, 5)))
        );
    }

    #[test]
    fn test_fill_solid_clips_to_buffer() {
        let mut fb = FrameBuffer::new(Size::new(8, 8));
        Rectangle::new(Point::new(-4, 6), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(WHITE))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(
            fb.dirty_area(),
            Some(Rectangle::new(Point::new(0, 6), Size::new(8, 2)))
        );
        assert_eq!(fb.pixel(Point::new(0, 7)), Some(WHITE));
        assert_eq!(fb.pixel(Point::new(0, 5)), Some(BLACK));
    }

    #[test]
    fn test_flush_sends_only_changed_region() {
        let mut fb = FrameBuffer::new(Size::new(16, 16));
        Pixel(Point::new(4, 4), WHITE).draw(&mut fb).unwrap();
        Pixel(Point::new(5, 5), WHITE).draw(&mut fb).unwrap();

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        fb.flush(&mut display).unwrap();

        assert_eq!(display.affected_area(), Rectangle::new(Point::new(4, 4), Size::new(2, 2)));
        assert_eq!(display.get_pixel(Point::new(4, 4)), Some(WHITE));
        assert_eq!(display.get_pixel(Point::new(5, 4)), Some(BLACK));
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_flush_when_clean_is_noop() {
        let mut fb = FrameBuffer::new(Size::new(16, 16));
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        fb.flush(&mut display).unwrap();

        assert_eq!(display.affected_area(), Rectangle::zero());
    }
}
