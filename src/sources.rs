//! Hardware readings the status screen refreshes from.
//!
//! These are implemented by the board support layer. The screen never caches
//! a reading: every refresh queries the source again.

pub use crate::clock::ClockSource;

/// USB power and wireless link state.
pub trait ConnectivitySource {
    /// Whether the keyboard is powered over USB
    fn is_wired_power_present(&self) -> bool;

    /// Whether the active wireless profile has a connected host
    fn is_wireless_link_active(&self) -> bool;
}

/// Battery fuel gauge.
pub trait BatterySource {
    /// State of charge, 0 to 100
    fn current_charge_percent(&self) -> u8;
}

/// Every reading a status screen needs.
pub trait StatusSources: ConnectivitySource + BatterySource + ClockSource {}

/// Implement StatusSources for any type that provides all three readings
impl<T: ConnectivitySource + BatterySource + ClockSource> StatusSources for T {}
