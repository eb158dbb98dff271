//! Desktop simulator for the arion keyboard status screen.
//!
//! Renders the status screen in an SDL2 window via `embedded-graphics-simulator`.
//! The keyboard's USB, wireless and battery state is faked and driven from the
//! keyboard, so every refresh path can be exercised without hardware.
//!
//! # Key bindings
//!
//! | Key | Action                           |
//! |-----|----------------------------------|
//! | U   | Toggle USB power                 |
//! | B   | Toggle wireless link             |
//! | +   | Battery +10 %                    |
//! | -   | Battery -10 %                    |
//! | T   | Advance the clock by one hour    |
//! | N   | Compose another screen on top    |
//! | D   | Tear down the newest screen      |
//! | R   | Force a full redraw              |
//! | Q   | Quit                             |

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use arion_status::clock::EmbassyClock;
use arion_status::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use arion_status::dispatcher::StatusEvent;
use arion_status::manager::{StatusSender, get_status_receiver, get_status_sender, notify};
use arion_status::sources::{BatterySource, ClockSource, ConnectivitySource};
use arion_status::{StatusConfig, StatusManager, StatusRequest};

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 4;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

const ONE_HOUR_MS: u64 = 3_600_000;

/// Keyboard hardware faked from key presses.
struct MockHardware {
    clock: EmbassyClock,
    clock_offset_ms: u64,
    usb_powered: bool,
    wireless_linked: bool,
    charge_percent: u8,
}

impl MockHardware {
    fn new() -> Self {
        Self {
            clock: EmbassyClock,
            clock_offset_ms: 0,
            usb_powered: true,
            wireless_linked: false,
            charge_percent: 72,
        }
    }
}

impl ConnectivitySource for MockHardware {
    fn is_wired_power_present(&self) -> bool {
        self.usb_powered
    }

    fn is_wireless_link_active(&self) -> bool {
        self.wireless_linked
    }
}

impl BatterySource for MockHardware {
    fn current_charge_percent(&self) -> u8 {
        self.charge_percent
    }
}

impl ClockSource for MockHardware {
    fn uptime_ms(&self) -> u64 {
        self.clock.uptime_ms() + self.clock_offset_ms
    }
}

type Manager = StatusManager<SimulatorDisplay<Rgb565>, MockHardware>;

/// Apply a key press to the fake hardware and queue the matching request.
///
/// Returns false when the simulator should quit.
fn handle_key(keycode: Keycode, manager: &mut Manager, sender: &StatusSender<'_>) -> bool {
    let hw = manager.sources_mut();

    match keycode {
        Keycode::Q | Keycode::Escape => return false,
        Keycode::U => {
            hw.usb_powered = !hw.usb_powered;
            info!("USB power: {}", hw.usb_powered);
            notify(sender, StatusRequest::Event(StatusEvent::ConnectionChanged));
        }
        Keycode::B => {
            hw.wireless_linked = !hw.wireless_linked;
            info!("Wireless link: {}", hw.wireless_linked);
            notify(sender, StatusRequest::Event(StatusEvent::ConnectionChanged));
        }
        Keycode::Plus | Keycode::KpPlus | Keycode::Equals => {
            hw.charge_percent = hw.charge_percent.saturating_add(10).min(100);
            info!("Battery: {}%", hw.charge_percent);
            notify(sender, StatusRequest::Event(StatusEvent::BatteryChanged));
        }
        Keycode::Minus | Keycode::KpMinus => {
            hw.charge_percent = hw.charge_percent.saturating_sub(10);
            info!("Battery: {}%", hw.charge_percent);
            notify(sender, StatusRequest::Event(StatusEvent::BatteryChanged));
        }
        Keycode::T => {
            // Shows on the next tick
            hw.clock_offset_ms += ONE_HOUR_MS;
        }
        Keycode::N => {
            notify(sender, StatusRequest::Compose);
        }
        Keycode::D => {
            if let Some(newest) = manager.screen_ids().last() {
                notify(sender, StatusRequest::TearDown(newest));
            }
        }
        Keycode::R => {
            notify(sender, StatusRequest::Redraw);
        }
        _ => {}
    }

    true
}

fn main() {
    env_logger::init();
    info!("Starting arion status simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: U=USB  B=Wireless  +/-=Battery  T=+1h  N=New  D=Drop  R=Redraw  Q=Quit");

    let display = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Arion Status Simulator", &output_settings);

    let sender = get_status_sender();
    let receiver = get_status_receiver();
    let clock = EmbassyClock;

    let mut manager = match StatusManager::new(display, MockHardware::new(), StatusConfig::default()) {
        Ok(manager) => manager,
        Err(e) => {
            error!("Invalid status configuration: {}", e);
            return;
        }
    };

    notify(&sender, StatusRequest::Compose);
    if let Err(e) = manager.drain(&receiver, clock.uptime_ms()) {
        error!("Render error: {:?}", e);
    }

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(manager.display());

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if !handle_key(keycode, &mut manager, &sender) {
                        break 'running;
                    }
                }
                _ => {}
            }
        }

        let now_ms = clock.uptime_ms();
        if let Err(e) = manager.drain(&receiver, now_ms) {
            error!("Render error: {:?}", e);
        }
        manager.poll_ticks(now_ms);
        if let Err(e) = manager.render() {
            error!("Render error: {:?}", e);
        }

        window.update(manager.display());

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
