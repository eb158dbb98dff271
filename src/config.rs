//! Display constants and the persisted status screen configuration.
//!
//! Layout and timing values that never change at runtime live here as
//! constants. Values a user may want to change (the date placeholder, the time
//! font) live in [`StatusConfig`], which is stored as a postcard blob.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::{StatusError, StatusResult};

/// Width of the keyboard's OLED panel in pixels
pub const DISPLAY_WIDTH_PX: u32 = 128;

/// Height of the keyboard's OLED panel in pixels
pub const DISPLAY_HEIGHT_PX: u32 = 64;

/// Height of the status strip at the top of the screen
pub const TOP_BAR_HEIGHT_PX: u32 = 16;

/// Horizontal inset of the connection and battery icons from the bar edges
pub const TOP_BAR_ICON_INSET_PX: i32 = 2;

/// Vertical offset of the time label from the screen center
pub const TIME_LABEL_OFFSET_Y_PX: i32 = 8;

/// Period of the time refresh tick
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Longest accepted tick period: one day
pub const MAX_TICK_INTERVAL_MS: u64 = 86_400_000;

/// Capacity of the date placeholder text
pub const DATE_TEXT_CAPACITY: usize = 16;

/// Date shown until a real-time clock source exists
pub const DEFAULT_DATE_TEXT: &str = "27/10/2025";

/// Maximum number of elements a canvas can hold at once.
///
/// One status screen uses six (screen, top bar, four labels).
pub const MAX_CANVAS_ELEMENTS: usize = 24;

/// Maximum number of event subscriptions per screen
pub const MAX_SUBSCRIPTIONS: usize = 4;

/// Maximum number of screens a manager drives at once
pub const MAX_SCREENS: usize = 4;

/// Capacity of the request channel feeding the status manager
pub const REQUEST_CHANNEL_CAPACITY: usize = 8;

/// Runtime configuration of a status screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    /// Text shown in the date slot of the top bar
    pub date_text: heapless::String<DATE_TEXT_CAPACITY>,
    /// Draw the time in the large font; the medium font is used otherwise
    pub large_time_font: bool,
    /// Period of the time refresh tick in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        let mut date_text = heapless::String::new();
        // DEFAULT_DATE_TEXT is shorter than DATE_TEXT_CAPACITY
        let _ = date_text.push_str(DEFAULT_DATE_TEXT);

        Self {
            date_text,
            large_time_font: true,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl StatusConfig {
    /// Build a configuration with a custom date placeholder.
    pub fn with_date_text(mut self, text: &str) -> StatusResult<Self> {
        let mut date_text = heapless::String::new();
        date_text
            .push_str(text)
            .map_err(|_| StatusError::TextTooLong {
                max: DATE_TEXT_CAPACITY,
            })?;
        self.date_text = date_text;
        Ok(self)
    }

    /// Check the values a screen cannot run with.
    ///
    /// The tick period must be non-zero (a zero period fires on every poll)
    /// and at most [`MAX_TICK_INTERVAL_MS`], so a deadline always converts to
    /// an embassy [`Instant`](embassy_time::Instant).
    pub fn validate(&self) -> StatusResult<()> {
        if self.tick_interval_ms == 0 || self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(StatusError::Config);
        }
        Ok(())
    }

    /// Decode a configuration previously written by [`StatusConfig::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> StatusResult<Self> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| StatusError::Config)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode the configuration for persistent storage.
    pub fn to_bytes(&self) -> StatusResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| StatusError::Config)
    }
}
