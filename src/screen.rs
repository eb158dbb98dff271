//! Status screen composition and lifecycle.
//!
//! Layout on the 128x64 panel:
//!
//! ```text
//! +--------------------------------+
//! |(((      27/10/2025     [### ] |  <- 16 px top bar
//! |                                |
//! |             12:34              |  <- time, centered 8 px low
//! |                                |
//! +--------------------------------+
//! ```

use embedded_graphics::prelude::*;
use log::{debug, info};

use crate::config::{
    DATE_TEXT_CAPACITY, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, MAX_SUBSCRIPTIONS, StatusConfig,
    TIME_LABEL_OFFSET_Y_PX, TOP_BAR_HEIGHT_PX, TOP_BAR_ICON_INSET_PX,
};
use crate::dispatcher::{
    PeriodicTick, StatusEvent, SubscriberTable, refresh_all, refresh_battery, refresh_connection,
    refresh_time,
};
use crate::error::StatusResult;
use crate::sources::StatusSources;
use crate::ui::{Align, Canvas, ColorPalette, Placement, Style, TextSize};
use crate::widget::{Slot, WidgetState};

/// Identifier of a live screen inside a [`StatusManager`](crate::manager::StatusManager)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u32);

/// One composed status screen and everything that refreshes it.
pub struct StatusScreen<C: Canvas, S> {
    id: ScreenId,
    root: Option<C::Handle>,
    state: WidgetState<C::Handle>,
    tick: PeriodicTick,
    subscribers: SubscriberTable<C, S, MAX_SUBSCRIPTIONS>,
    date_text: heapless::String<DATE_TEXT_CAPACITY>,
}

impl<C: Canvas, S: StatusSources> StatusScreen<C, S> {
    /// Build the element tree, fill every field and arm the time tick.
    ///
    /// An unusable configuration is rejected before anything is created. If
    /// any element cannot be created, whatever was already created is deleted
    /// again and the error is returned.
    pub fn compose(
        id: ScreenId,
        canvas: &mut C,
        config: &StatusConfig,
        sources: &S,
        now_ms: u64,
    ) -> StatusResult<Self> {
        config.validate()?;

        let palette = ColorPalette::default();
        let root = canvas.create_container(
            None,
            Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
            Placement::aligned(Align::TopLeft),
            Style::new().with_background(palette.background),
        )?;

        let state = match build_widgets(canvas, root, config, &palette) {
            Ok(state) => state,
            Err(e) => {
                canvas.delete(root);
                return Err(e);
            }
        };

        let mut screen = Self {
            id,
            root: Some(root),
            state,
            tick: PeriodicTick::new(config.tick_interval_ms),
            subscribers: SubscriberTable::new(),
            date_text: config.date_text.clone(),
        };

        if let Err(e) = screen.subscribe() {
            screen.teardown(canvas);
            return Err(e);
        }

        refresh_all(&screen.state, canvas, sources, &screen.date_text);
        screen.tick.arm(now_ms);

        info!("Status screen {:?} composed", id);
        Ok(screen)
    }

    fn subscribe(&mut self) -> StatusResult<()> {
        self.subscribers
            .register(StatusEvent::ConnectionChanged, refresh_connection::<C, S>)?;
        self.subscribers
            .register(StatusEvent::BatteryChanged, refresh_battery::<C, S>)?;
        Ok(())
    }

    /// Advance the time tick. Returns whether the time label was refreshed.
    pub fn on_tick(&mut self, canvas: &mut C, sources: &S, now_ms: u64) -> bool {
        if !self.tick.poll(now_ms) {
            return false;
        }

        refresh_time(&self.state, canvas, sources);
        true
    }

    /// Route a hardware event to its subscribers. Returns how many handlers ran.
    pub fn on_event(&mut self, event: StatusEvent, canvas: &mut C, sources: &S) -> usize {
        self.subscribers.dispatch(event, &self.state, canvas, sources)
    }

    /// Rewrite every field from the current readings.
    pub fn refresh(&mut self, canvas: &mut C, sources: &S) {
        refresh_all(&self.state, canvas, sources, &self.date_text);
    }
}

impl<C: Canvas, S> StatusScreen<C, S> {
    pub fn id(&self) -> ScreenId {
        self.id
    }

    /// Element handles of this screen
    pub fn state(&self) -> &WidgetState<C::Handle> {
        &self.state
    }

    pub fn root(&self) -> Option<C::Handle> {
        self.root
    }

    /// Deadline of the next time refresh, `None` once torn down.
    pub fn next_tick_due(&self) -> Option<u64> {
        self.tick.next_due()
    }

    pub fn is_live(&self) -> bool {
        self.root.is_some()
    }

    /// Stop every trigger, then release the elements.
    ///
    /// Safe to call more than once.
    pub fn teardown(&mut self, canvas: &mut C) {
        self.tick.cancel();
        self.subscribers.clear();
        self.state.invalidate();

        if let Some(root) = self.root.take() {
            canvas.delete(root);
            debug!("Status screen {:?} torn down", self.id);
        }
    }
}

fn build_widgets<C: Canvas>(
    canvas: &mut C,
    root: C::Handle,
    config: &StatusConfig,
    palette: &ColorPalette,
) -> StatusResult<WidgetState<C::Handle>> {
    let text_style = Style::new().with_foreground(palette.text_primary);

    let top_bar = canvas.create_container(
        Some(root),
        Size::new(DISPLAY_WIDTH_PX, TOP_BAR_HEIGHT_PX),
        Placement::aligned(Align::TopMid),
        Style::transparent(),
    )?;

    let mut state = WidgetState::new();

    let connection_icon = canvas.create_label(top_bar)?;
    canvas.set_placement(
        connection_icon,
        Placement::new(Align::LeftMid, Point::new(TOP_BAR_ICON_INSET_PX, 0)),
    );
    canvas.set_style(connection_icon, text_style);
    state.bind(Slot::ConnectionIcon, connection_icon);

    let date_label = canvas.create_label(top_bar)?;
    canvas.set_placement(date_label, Placement::aligned(Align::Center));
    canvas.set_style(date_label, text_style);
    state.bind(Slot::DateLabel, date_label);

    let battery_icon = canvas.create_label(top_bar)?;
    canvas.set_placement(
        battery_icon,
        Placement::new(Align::RightMid, Point::new(-TOP_BAR_ICON_INSET_PX, 0)),
    );
    canvas.set_style(battery_icon, text_style);
    state.bind(Slot::BatteryIcon, battery_icon);

    let time_label = canvas.create_label(root)?;
    canvas.set_placement(
        time_label,
        Placement::new(Align::Center, Point::new(0, TIME_LABEL_OFFSET_Y_PX)),
    );
    canvas.set_style(time_label, text_style);
    canvas.set_text_size(
        time_label,
        if config.large_time_font {
            TextSize::Large
        } else {
            TextSize::Medium
        },
    );
    state.bind(Slot::TimeLabel, time_label);

    Ok(state)
}
