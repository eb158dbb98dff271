//! Element handles owned by one status screen.

use log::debug;

use crate::icons::Symbol;
use crate::ui::Canvas;

/// Which of the four status elements a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    ConnectionIcon,
    BatteryIcon,
    TimeLabel,
    DateLabel,
}

/// The live element handles of one screen.
///
/// Every setter is a no-op while its handle is unset, which covers both a
/// half-composed screen and one that has been torn down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetState<H> {
    connection_icon: Option<H>,
    battery_icon: Option<H>,
    time_label: Option<H>,
    date_label: Option<H>,
}

impl<H> Default for WidgetState<H> {
    fn default() -> Self {
        Self {
            connection_icon: None,
            battery_icon: None,
            time_label: None,
            date_label: None,
        }
    }
}

impl<H: Copy> WidgetState<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, slot: Slot, handle: H) {
        *self.slot_mut(slot) = Some(handle);
    }

    pub fn handle(&self, slot: Slot) -> Option<H> {
        match slot {
            Slot::ConnectionIcon => self.connection_icon,
            Slot::BatteryIcon => self.battery_icon,
            Slot::TimeLabel => self.time_label,
            Slot::DateLabel => self.date_label,
        }
    }

    pub fn is_fully_bound(&self) -> bool {
        self.connection_icon.is_some()
            && self.battery_icon.is_some()
            && self.time_label.is_some()
            && self.date_label.is_some()
    }

    /// Clear every handle. Must happen before the elements are deleted.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    pub fn set_connection_icon<C: Canvas<Handle = H>>(&self, canvas: &mut C, symbol: Symbol) {
        self.write(canvas, Slot::ConnectionIcon, symbol.glyph());
    }

    pub fn set_battery_icon<C: Canvas<Handle = H>>(&self, canvas: &mut C, symbol: Symbol) {
        self.write(canvas, Slot::BatteryIcon, symbol.glyph());
    }

    pub fn set_time_text<C: Canvas<Handle = H>>(&self, canvas: &mut C, text: &str) {
        self.write(canvas, Slot::TimeLabel, text);
    }

    pub fn set_date_text<C: Canvas<Handle = H>>(&self, canvas: &mut C, text: &str) {
        self.write(canvas, Slot::DateLabel, text);
    }

    fn write<C: Canvas<Handle = H>>(&self, canvas: &mut C, slot: Slot, text: &str) {
        match self.handle(slot) {
            Some(handle) => canvas.set_text(handle, text),
            None => debug!("{:?} unbound, skipping write", slot),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<H> {
        match slot {
            Slot::ConnectionIcon => &mut self.connection_icon,
            Slot::BatteryIcon => &mut self.battery_icon,
            Slot::TimeLabel => &mut self.time_label,
            Slot::DateLabel => &mut self.date_label,
        }
    }
}
