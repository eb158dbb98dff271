//! Refresh routines. Each one re-reads its source, never a cached value.

use crate::clock::format_time;
use crate::icons::{render_battery_icon, render_connection_icon};
use crate::sources::{BatterySource, ClockSource, ConnectivitySource};
use crate::ui::Canvas;
use crate::widget::WidgetState;

pub fn refresh_connection<C: Canvas, S: ConnectivitySource>(
    state: &WidgetState<C::Handle>,
    canvas: &mut C,
    sources: &S,
) {
    let symbol = render_connection_icon(
        sources.is_wired_power_present(),
        sources.is_wireless_link_active(),
    );
    state.set_connection_icon(canvas, symbol);
}

pub fn refresh_battery<C: Canvas, S: BatterySource>(
    state: &WidgetState<C::Handle>,
    canvas: &mut C,
    sources: &S,
) {
    let symbol = render_battery_icon(sources.current_charge_percent());
    state.set_battery_icon(canvas, symbol);
}

pub fn refresh_time<C: Canvas, S: ClockSource>(
    state: &WidgetState<C::Handle>,
    canvas: &mut C,
    sources: &S,
) {
    state.set_time_text(canvas, &format_time(sources.uptime_ms()));
}

/// Write all four fields, so a fresh screen never shows blanks.
pub fn refresh_all<C, S>(state: &WidgetState<C::Handle>, canvas: &mut C, sources: &S, date: &str)
where
    C: Canvas,
    S: ConnectivitySource + BatterySource + ClockSource,
{
    refresh_connection(state, canvas, sources);
    refresh_battery(state, canvas, sources);
    refresh_time(state, canvas, sources);
    state.set_date_text(canvas, date);
}
