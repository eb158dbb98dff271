//! End-to-end behaviour of a status screen over a canvas that records writes.

use std::cell::Cell;
use std::collections::HashMap;

use arion_status::dispatcher::StatusEvent;
use arion_status::error::StatusResult;
use arion_status::icons::Symbol;
use arion_status::screen::{ScreenId, StatusScreen};
use arion_status::sources::{BatterySource, ClockSource, ConnectivitySource};
use arion_status::ui::{Canvas, Placement, Style, TextSize};
use arion_status::widget::Slot;
use arion_status::StatusConfig;
use embedded_graphics::prelude::Size;

/// Canvas double that keeps every label's text and counts writes.
#[derive(Default)]
struct RecordingCanvas {
    next: u32,
    live: HashMap<u32, Option<u32>>,
    texts: HashMap<u32, String>,
    writes: usize,
}

impl RecordingCanvas {
    fn text(&self, handle: u32) -> Option<&str> {
        self.texts.get(&handle).map(String::as_str)
    }
}

impl Canvas for RecordingCanvas {
    type Handle = u32;

    fn create_container(
        &mut self,
        parent: Option<u32>,
        _size: Size,
        _placement: Placement,
        _style: Style,
    ) -> StatusResult<u32> {
        self.next += 1;
        self.live.insert(self.next, parent);
        Ok(self.next)
    }

    fn create_label(&mut self, parent: u32) -> StatusResult<u32> {
        self.next += 1;
        self.live.insert(self.next, Some(parent));
        self.texts.insert(self.next, String::new());
        Ok(self.next)
    }

    fn set_text(&mut self, handle: u32, text: &str) {
        self.writes += 1;
        if self.live.contains_key(&handle) {
            self.texts.insert(handle, text.to_string());
        }
    }

    fn set_placement(&mut self, _handle: u32, _placement: Placement) {}

    fn set_style(&mut self, _handle: u32, _style: Style) {}

    fn set_text_size(&mut self, _handle: u32, _size: TextSize) {}

    fn delete(&mut self, handle: u32) {
        let mut doomed = vec![handle];
        while let Some(id) = doomed.pop() {
            self.live.remove(&id);
            self.texts.remove(&id);
            doomed.extend(
                self.live
                    .iter()
                    .filter(|(_, parent)| **parent == Some(id))
                    .map(|(child, _)| *child),
            );
        }
    }
}

struct Hardware {
    wired: Cell<bool>,
    wireless: Cell<bool>,
    charge: Cell<u8>,
    uptime_ms: Cell<u64>,
}

impl Hardware {
    fn new() -> Self {
        Self {
            wired: Cell::new(true),
            wireless: Cell::new(false),
            charge: Cell::new(80),
            uptime_ms: Cell::new(86_399_000),
        }
    }
}

impl ConnectivitySource for Hardware {
    fn is_wired_power_present(&self) -> bool {
        self.wired.get()
    }

    fn is_wireless_link_active(&self) -> bool {
        self.wireless.get()
    }
}

impl BatterySource for Hardware {
    fn current_charge_percent(&self) -> u8 {
        self.charge.get()
    }
}

impl ClockSource for Hardware {
    fn uptime_ms(&self) -> u64 {
        self.uptime_ms.get()
    }
}

type Screen = StatusScreen<RecordingCanvas, Hardware>;

fn compose(canvas: &mut RecordingCanvas, hw: &Hardware) -> Screen {
    Screen::compose(ScreenId(7), canvas, &StatusConfig::default(), hw, 0).unwrap()
}

fn slot_text<'a>(canvas: &'a RecordingCanvas, screen: &Screen, slot: Slot) -> &'a str {
    canvas
        .text(screen.state().handle(slot).unwrap())
        .unwrap()
}

#[test]
fn test_initial_refresh_fills_all_fields() {
    let mut canvas = RecordingCanvas::default();
    let hw = Hardware::new();
    let screen = compose(&mut canvas, &hw);

    assert!(screen.is_live());
    assert!(screen.state().is_fully_bound());
    assert_eq!(slot_text(&canvas, &screen, Slot::ConnectionIcon), "(((");
    assert_eq!(slot_text(&canvas, &screen, Slot::BatteryIcon), Symbol::Battery3.glyph());
    assert_eq!(slot_text(&canvas, &screen, Slot::TimeLabel), "23:59");
    assert_eq!(slot_text(&canvas, &screen, Slot::DateLabel), "27/10/2025");
}

#[test]
fn test_custom_date_is_shown() {
    let mut canvas = RecordingCanvas::default();
    let hw = Hardware::new();
    let config = StatusConfig::default().with_date_text("01/01/2030").unwrap();
    let screen = Screen::compose(ScreenId(0), &mut canvas, &config, &hw, 0).unwrap();

    assert_eq!(slot_text(&canvas, &screen, Slot::DateLabel), "01/01/2030");
}

#[test]
fn test_repeated_refresh_is_idempotent() {
    let mut canvas = RecordingCanvas::default();
    let hw = Hardware::new();
    let mut screen = compose(&mut canvas, &hw);

    let snapshot = canvas.texts.clone();
    screen.on_event(StatusEvent::BatteryChanged, &mut canvas, &hw);
    screen.on_event(StatusEvent::BatteryChanged, &mut canvas, &hw);
    screen.on_event(StatusEvent::ConnectionChanged, &mut canvas, &hw);
    screen.refresh(&mut canvas, &hw);

    assert_eq!(canvas.texts, snapshot);
}

#[test]
fn test_time_wraps_at_midnight_on_tick() {
    let mut canvas = RecordingCanvas::default();
    let hw = Hardware::new();
    let mut screen = compose(&mut canvas, &hw);

    hw.uptime_ms.set(86_400_000);
    assert!(screen.on_tick(&mut canvas, &hw, 1000));

    assert_eq!(slot_text(&canvas, &screen, Slot::TimeLabel), "00:00");
}

#[test]
fn test_unplugging_usb_with_no_wireless_disconnects() {
    let mut canvas = RecordingCanvas::default();
    let hw = Hardware::new();
    let mut screen = compose(&mut canvas, &hw);

    hw.wired.set(false);
    screen.on_event(StatusEvent::ConnectionChanged, &mut canvas, &hw);
    assert_eq!(slot_text(&canvas, &screen, Slot::ConnectionIcon), "--");

    hw.wireless.set(true);
    screen.on_event(StatusEvent::ConnectionChanged, &mut canvas, &hw);
    assert_eq!(slot_text(&canvas, &screen, Slot::ConnectionIcon), "(((");
}

#[test]
fn test_no_writes_after_teardown() {
    let mut canvas = RecordingCanvas::default();
    let hw = Hardware::new();
    let mut screen = compose(&mut canvas, &hw);

    screen.teardown(&mut canvas);
    let writes = canvas.writes;

    assert!(canvas.live.is_empty());
    assert_eq!(screen.next_tick_due(), None);
    assert!(!screen.on_tick(&mut canvas, &hw, 60_000));
    assert_eq!(screen.on_event(StatusEvent::ConnectionChanged, &mut canvas, &hw), 0);
    assert_eq!(screen.on_event(StatusEvent::BatteryChanged, &mut canvas, &hw), 0);
    screen.refresh(&mut canvas, &hw);

    assert_eq!(canvas.writes, writes);
}

#[test]
fn test_screens_are_independent() {
    let mut canvas = RecordingCanvas::default();
    let hw = Hardware::new();
    let mut first = compose(&mut canvas, &hw);
    let mut second = compose(&mut canvas, &hw);

    first.teardown(&mut canvas);
    hw.charge.set(5);
    second.on_event(StatusEvent::BatteryChanged, &mut canvas, &hw);

    assert_eq!(
        slot_text(&canvas, &second, Slot::BatteryIcon),
        Symbol::BatteryEmpty.glyph()
    );
    assert!(second.is_live());
}
