//! Styling for canvas elements
//!
//! - [`colors`] - Color constants and palette
//! - [`layout`] - Padding
//! - [`style`] - Per-element style configuration

pub mod colors;
pub mod layout;
pub mod style;

pub use colors::{BLACK, ColorPalette, WHITE};
pub use layout::Padding;
pub use style::Style;
