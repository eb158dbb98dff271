//! The element-tree capability the status screen is composed on.

use core::fmt::Debug;

use embedded_graphics::prelude::Size;

use crate::error::StatusResult;
use crate::ui::placement::Placement;
use crate::ui::styling::Style;
use crate::ui::text::TextSize;

/// A tree of visual elements addressed by opaque handles.
///
/// Every mutating call on a handle whose element was deleted must be ignored.
/// Only creation can fail.
pub trait Canvas {
    /// Opaque reference to a created element
    type Handle: Copy + PartialEq + Debug;

    /// Create a box of `size`. `None` as parent makes a new root.
    fn create_container(
        &mut self,
        parent: Option<Self::Handle>,
        size: Size,
        placement: Placement,
        style: Style,
    ) -> StatusResult<Self::Handle>;

    /// Create an empty text element inside `parent`.
    fn create_label(&mut self, parent: Self::Handle) -> StatusResult<Self::Handle>;

    /// Replace the text of a label.
    fn set_text(&mut self, handle: Self::Handle, text: &str);

    fn set_placement(&mut self, handle: Self::Handle, placement: Placement);

    fn set_style(&mut self, handle: Self::Handle, style: Style);

    fn set_text_size(&mut self, handle: Self::Handle, size: TextSize);

    /// Delete an element and all of its descendants.
    fn delete(&mut self, handle: Self::Handle);
}
