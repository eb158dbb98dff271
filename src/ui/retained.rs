//! Retained-mode element arena drawn through embedded-graphics.
//!
//! Elements live in a fixed-capacity slot table. A [`NodeId`] carries the
//! generation of the slot it was issued for, so once an element is deleted
//! every old handle to it stops matching, even after the slot is reused.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use log::{debug, warn};

use crate::error::{StatusError, StatusResult};
use crate::ui::canvas::Canvas;
use crate::ui::placement::Placement;
use crate::ui::styling::{Style, WHITE};
use crate::ui::text::TextSize;

/// Capacity of a label's text buffer
pub const LABEL_TEXT_CAPACITY: usize = 32;

/// Handle to an element of a [`RetainedCanvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u16,
    generation: u16,
}

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    Container { size: Size },
    Label { text: heapless::String<LABEL_TEXT_CAPACITY> },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
    placement: Placement,
    style: Style,
    text_size: TextSize,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u16,
    node: Option<Node>,
}

/// Element arena holding up to `N` live elements.
pub struct RetainedCanvas<const N: usize> {
    bounds: Rectangle,
    slots: heapless::Vec<Slot, N>,
    /// Live slot indices in creation order, which is also draw order
    order: heapless::Vec<u16, N>,
    dirty: bool,
}

impl<const N: usize> RetainedCanvas<N> {
    /// Create an empty canvas covering `bounds`.
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            slots: heapless::Vec::new(),
            order: heapless::Vec::new(),
            dirty: true,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` still refers to a live element.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Current text of a label, `None` for containers and stale handles.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Label { text } => Some(text.as_str()),
            NodeKind::Container { .. } => None,
        }
    }

    pub fn text_size(&self, id: NodeId) -> Option<TextSize> {
        self.node(id).map(|node| node.text_size)
    }

    pub fn style(&self, id: NodeId) -> Option<Style> {
        self.node(id).map(|node| node.style)
    }

    /// Absolute screen rectangle of a live element.
    pub fn absolute_bounds(&self, id: NodeId) -> Option<Rectangle> {
        let node = self.node(id)?;
        let parent_area = match node.parent {
            Some(parent) => {
                let parent_rect = self.absolute_bounds(parent)?;
                let parent_style = self.node(parent)?.style;
                content_area(parent_rect, &parent_style)
            }
            None => self.bounds,
        };

        Some(node.placement.resolve(self.size_of(node), &parent_area))
    }

    /// Whether anything changed since the last [`mark_clean`](Self::mark_clean)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Draw every live element, parents before children.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        for &index in self.order.iter() {
            let Some(slot) = self.slots.get(index as usize) else {
                continue;
            };
            let Some(node) = &slot.node else {
                continue;
            };
            let id = NodeId {
                index,
                generation: slot.generation,
            };
            let Some(rect) = self.absolute_bounds(id) else {
                continue;
            };

            if node.style.is_visible() {
                rect.into_styled(node.style.to_primitive_style())
                    .draw(display)?;
            }

            if let NodeKind::Label { text } = &node.kind
                && !text.is_empty()
            {
                let color = node.style.foreground_color.unwrap_or(WHITE);
                let text_style = MonoTextStyle::new(node.text_size.font(), color);
                Text::with_baseline(text, rect.top_left, text_style, Baseline::Top)
                    .draw(display)?;
            }
        }

        Ok(())
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    fn size_of(&self, node: &Node) -> Size {
        match &node.kind {
            NodeKind::Container { size } => *size,
            NodeKind::Label { text } => node.text_size.measure(text),
        }
    }

    fn insert(&mut self, node: Node) -> StatusResult<NodeId> {
        let free = self.slots.iter().position(|slot| slot.node.is_none());

        let index = match free {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots
                    .push(Slot {
                        generation: 0,
                        node: Some(node),
                    })
                    .map_err(|_| StatusError::CanvasFull { max: N })?;
                self.slots.len() - 1
            }
        };

        let index = index as u16;
        // order never holds more entries than there are slots
        let _ = self.order.push(index);
        self.dirty = true;

        Ok(NodeId {
            index,
            generation: self.slots[index as usize].generation,
        })
    }

    fn remove(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize)
            && slot.generation == id.generation
            && slot.node.take().is_some()
        {
            slot.generation = slot.generation.wrapping_add(1);
            self.order.retain(|&index| index != id.index);
        }
    }

    fn children_of(&self, parent: NodeId) -> heapless::Vec<NodeId, N> {
        let mut children = heapless::Vec::new();
        for &index in self.order.iter() {
            let slot = &self.slots[index as usize];
            if let Some(node) = &slot.node
                && node.parent == Some(parent)
            {
                let _ = children.push(NodeId {
                    index,
                    generation: slot.generation,
                });
            }
        }
        children
    }
}

impl<const N: usize> Canvas for RetainedCanvas<N> {
    type Handle = NodeId;

    fn create_container(
        &mut self,
        parent: Option<NodeId>,
        size: Size,
        placement: Placement,
        style: Style,
    ) -> StatusResult<NodeId> {
        if let Some(parent) = parent
            && !self.contains(parent)
        {
            return Err(StatusError::StaleHandle);
        }

        self.insert(Node {
            parent,
            kind: NodeKind::Container { size },
            placement,
            style,
            text_size: TextSize::default(),
        })
    }

    fn create_label(&mut self, parent: NodeId) -> StatusResult<NodeId> {
        if !self.contains(parent) {
            return Err(StatusError::StaleHandle);
        }

        self.insert(Node {
            parent: Some(parent),
            kind: NodeKind::Label {
                text: heapless::String::new(),
            },
            placement: Placement::default(),
            style: Style::default(),
            text_size: TextSize::default(),
        })
    }

    fn set_text(&mut self, handle: NodeId, text: &str) {
        let Some(node) = self.node_mut(handle) else {
            debug!("Ignoring set_text on stale element {:?}", handle);
            return;
        };

        let NodeKind::Label { text: current } = &mut node.kind else {
            return;
        };

        if current.as_str() == text {
            return;
        }

        let mut new_text = heapless::String::new();
        if new_text.push_str(text).is_err() {
            warn!(
                "Label text exceeds {} bytes, keeping previous text",
                LABEL_TEXT_CAPACITY
            );
            return;
        }

        *current = new_text;
        self.dirty = true;
    }

    fn set_placement(&mut self, handle: NodeId, placement: Placement) {
        if let Some(node) = self.node_mut(handle)
            && node.placement != placement
        {
            node.placement = placement;
            self.dirty = true;
        }
    }

    fn set_style(&mut self, handle: NodeId, style: Style) {
        if let Some(node) = self.node_mut(handle)
            && node.style != style
        {
            node.style = style;
            self.dirty = true;
        }
    }

    fn set_text_size(&mut self, handle: NodeId, size: TextSize) {
        if let Some(node) = self.node_mut(handle)
            && node.text_size != size
        {
            node.text_size = size;
            self.dirty = true;
        }
    }

    fn delete(&mut self, handle: NodeId) {
        if !self.contains(handle) {
            return;
        }

        // Depth-first over an explicit stack; the arena bounds its size
        let mut pending: heapless::Vec<NodeId, N> = heapless::Vec::new();
        let _ = pending.push(handle);

        while let Some(id) = pending.pop() {
            for child in self.children_of(id) {
                let _ = pending.push(child);
            }
            self.remove(id);
        }

        self.dirty = true;
    }
}

/// Area inside `rect` left for children once borders and padding are taken.
fn content_area(rect: Rectangle, style: &Style) -> Rectangle {
    let border = if style.border_color.is_some() {
        style.border_width
    } else {
        0
    };
    let padding = style.padding;

    let top_left = rect.top_left + Point::new(
        (padding.left + border) as i32,
        (padding.top + border) as i32,
    );
    let size = Size::new(
        rect.size.width.saturating_sub(padding.horizontal() + 2 * border),
        rect.size.height.saturating_sub(padding.vertical() + 2 * border),
    );

    Rectangle::new(top_left, size)
}
