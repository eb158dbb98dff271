//! Time-of-day formatting from the uptime counter.
//!
//! The keyboard has no real-time clock, so time since boot stands in for the
//! time of day and wraps every 24 hours.

use core::fmt::Write;

use embassy_time::Instant;

/// Length of an `HH:MM` string
pub const TIME_TEXT_LEN: usize = 5;

const SECONDS_PER_DAY: u64 = 86_400;

/// Monotonic milliseconds-since-boot counter.
pub trait ClockSource {
    fn uptime_ms(&self) -> u64;
}

/// Uptime read from the embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl ClockSource for EmbassyClock {
    fn uptime_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Format elapsed milliseconds as a zero-padded 24 hour `HH:MM`.
pub fn format_time(elapsed_ms: u64) -> heapless::String<TIME_TEXT_LEN> {
    let total_seconds = (elapsed_ms / 1000) % SECONDS_PER_DAY;
    let hours = (total_seconds / 3600) % 24;
    let minutes = (total_seconds % 3600) / 60;

    let mut text = heapless::String::new();
    // Both fields are below 100, so the output is always five bytes
    let _ = write!(text, "{:02}:{:02}", hours, minutes);
    text
}
