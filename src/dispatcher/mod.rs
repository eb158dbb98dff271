//! Binds update triggers to widget refreshes.
//!
//! A screen is refreshed from three triggers: the periodic [`PeriodicTick`]
//! for the time, and connection and battery change events routed through a
//! [`SubscriberTable`]. Handlers always re-read the hardware; an event only
//! says that something changed.

mod refresh;
mod subscribers;
mod tick;

pub use refresh::{refresh_all, refresh_battery, refresh_connection, refresh_time};
pub use subscribers::{Handler, SubscriberTable};
pub use tick::PeriodicTick;

/// Hardware change notification. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// USB power or the wireless link came or went
    ConnectionChanged,
    /// The fuel gauge reported a new charge level
    BatteryChanged,
}
