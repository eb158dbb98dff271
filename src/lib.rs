#![no_std]

//! Status screen for the arion keyboard display.
//!
//! Shows the connection state, battery level, time since boot and a date on
//! the keyboard's OLED and keeps them in sync with the hardware. Connection and
//! battery changes arrive as events, the time is refreshed by a one second
//! tick, and both are handled by a single [`manager::StatusManager`] loop.

extern crate alloc;

pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod framebuffer;
pub mod icons;
pub mod manager;
pub mod screen;
pub mod sources;
pub mod ui;
pub mod widget;

pub use config::StatusConfig;
pub use error::{StatusError, StatusResult};
pub use manager::{StatusManager, StatusRequest};
pub use screen::{ScreenId, StatusScreen};
