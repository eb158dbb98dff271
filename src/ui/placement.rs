//! Anchor-and-offset positioning of elements inside their parent.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_layout::align::{Align as _, horizontal, vertical};

/// Anchor of an element relative to its parent's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    TopLeft,
    TopMid,
    TopRight,
    LeftMid,
    Center,
    RightMid,
    BottomLeft,
    BottomMid,
    BottomRight,
}

/// Where an element sits: an anchor plus a pixel offset from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub align: Align,
    pub offset: Point,
}

impl Placement {
    pub const fn new(align: Align, offset: Point) -> Self {
        Self { align, offset }
    }

    /// Anchor with no offset
    pub const fn aligned(align: Align) -> Self {
        Self {
            align,
            offset: Point::zero(),
        }
    }

    /// Resolve an element of `size` inside `parent` to absolute coordinates.
    pub fn resolve(&self, size: Size, parent: &Rectangle) -> Rectangle {
        place(Rectangle::new(parent.top_left, size), parent, self.align).translate(self.offset)
    }
}

/// Align `rect` to `parent` at the given anchor.
pub fn place(rect: Rectangle, parent: &Rectangle, align: Align) -> Rectangle {
    match align {
        Align::TopLeft => rect.align_to(parent, horizontal::Left, vertical::Top),
        Align::TopMid => rect.align_to(parent, horizontal::Center, vertical::Top),
        Align::TopRight => rect.align_to(parent, horizontal::Right, vertical::Top),
        Align::LeftMid => rect.align_to(parent, horizontal::Left, vertical::Center),
        Align::Center => rect.align_to(parent, horizontal::Center, vertical::Center),
        Align::RightMid => rect.align_to(parent, horizontal::Right, vertical::Center),
        Align::BottomLeft => rect.align_to(parent, horizontal::Left, vertical::Bottom),
        Align::BottomMid => rect.align_to(parent, horizontal::Center, vertical::Bottom),
        Align::BottomRight => rect.align_to(parent, horizontal::Right, vertical::Bottom),
    }
}
