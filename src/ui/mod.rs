// src/ui/mod.rs
//! Arion UI layer - element tree, styling and drawing for the status screen
//!
//! - [`canvas`] - the `Canvas` capability screens are composed on
//! - [`retained`] - arena-backed `Canvas` drawn through embedded-graphics
//! - [`placement`] - anchor and offset positioning via embedded-layout
//! - [`styling`] - colors, padding and per-element style
//! - [`text`] - font presets

pub mod canvas;
pub mod placement;
pub mod retained;
pub mod styling;
pub mod text;

pub use canvas::Canvas;
pub use placement::{Align, Placement};
pub use retained::{LABEL_TEXT_CAPACITY, NodeId, RetainedCanvas};
pub use styling::{BLACK, ColorPalette, Padding, Style, WHITE};
pub use text::TextSize;
