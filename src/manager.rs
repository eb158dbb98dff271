//! Status manager: the single loop that owns every status screen
//!
//! This module provides the cooperative task that:
//! - Composes and tears down status screens on request
//! - Routes connection and battery events to every live screen
//! - Fires the per-screen time ticks when they fall due
//! - Renders the canvas through the frame buffer, flushing only what changed
//!
//! Everything that touches widget state runs on this one loop, so no handler
//! can interleave with another.

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender, TrySendError};
use embassy_time::{Instant, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, error, info, warn};

use crate::config::{
    DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, MAX_CANVAS_ELEMENTS, MAX_SCREENS, REQUEST_CHANNEL_CAPACITY,
    StatusConfig,
};

use crate::dispatcher::StatusEvent;
use crate::error::{StatusError, StatusResult};
use crate::framebuffer::FrameBuffer;
use crate::screen::{ScreenId, StatusScreen};
use crate::sources::StatusSources;
use crate::ui::{BLACK, RetainedCanvas};

/// Canvas type the manager composes screens on
pub type StatusCanvas = RetainedCanvas<MAX_CANVAS_ELEMENTS>;

/// Request handled by the status manager loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRequest {
    /// A hardware change notification
    Event(StatusEvent),
    /// Compose a new status screen
    Compose,
    /// Tear down a screen; unknown ids are ignored
    TearDown(ScreenId),
    /// Push the whole frame to the panel again
    Redraw,
}

pub type StatusChannel = Channel<CriticalSectionRawMutex, StatusRequest, REQUEST_CHANNEL_CAPACITY>;
pub type StatusSender<'a> =
    Sender<'a, CriticalSectionRawMutex, StatusRequest, REQUEST_CHANNEL_CAPACITY>;
pub type StatusReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, StatusRequest, REQUEST_CHANNEL_CAPACITY>;

/// Global channel for status requests
pub static STATUS_CHANNEL: StatusChannel = Channel::new();

/// Helper to get a status request sender
pub fn get_status_sender() -> StatusSender<'static> {
    STATUS_CHANNEL.sender()
}

/// Helper to get a status request receiver
pub fn get_status_receiver() -> StatusReceiver<'static> {
    STATUS_CHANNEL.receiver()
}

/// Queue a request without waiting.
///
/// Meant for interrupt and event-callback context. When the queue is full the
/// request is dropped; the next event or tick re-reads the hardware anyway.
pub fn notify(sender: &StatusSender<'_>, request: StatusRequest) -> bool {
    match sender.try_send(request) {
        Ok(()) => true,
        Err(TrySendError::Full(dropped)) => {
            warn!("Status request queue full, dropping {:?}", dropped);
            false
        }
    }
}

/// Owns the panel, the canvas and every live status screen.
pub struct StatusManager<D, S>
where
    D: DrawTarget<Color = Rgb565>,
{
    display: D,
    canvas: StatusCanvas,
    framebuffer: FrameBuffer,
    screens: heapless::Vec<StatusScreen<StatusCanvas, S>, MAX_SCREENS>,
    sources: S,
    config: StatusConfig,
    next_id: u32,
}

impl<D, S> StatusManager<D, S>
where
    D: DrawTarget<Color = Rgb565>,
    S: StatusSources,
{
    /// Create a manager with no screens yet.
    ///
    /// Fails with [`StatusError::Config`] when the configuration cannot drive
    /// a tick.
    pub fn new(display: D, sources: S, config: StatusConfig) -> StatusResult<Self> {
        config.validate()?;

        let bounds = Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
        );

        Ok(Self {
            display,
            canvas: RetainedCanvas::new(bounds),
            framebuffer: FrameBuffer::new(bounds.size),
            screens: heapless::Vec::new(),
            sources,
            config,
            next_id: 0,
        })
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn canvas(&self) -> &StatusCanvas {
        &self.canvas
    }

    pub fn sources(&self) -> &S {
        &self.sources
    }

    /// Mutable access to the hardware readings, for hosts that fake them
    pub fn sources_mut(&mut self) -> &mut S {
        &mut self.sources
    }

    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    pub fn screen(&self, id: ScreenId) -> Option<&StatusScreen<StatusCanvas, S>> {
        self.screens.iter().find(|screen| screen.id() == id)
    }

    /// Ids of the live screens, oldest first
    pub fn screen_ids(&self) -> impl Iterator<Item = ScreenId> + '_ {
        self.screens.iter().map(|screen| screen.id())
    }

    /// Compose a new screen on top of the existing ones.
    pub fn compose(&mut self, now_ms: u64) -> StatusResult<ScreenId> {
        if self.screens.is_full() {
            return Err(StatusError::ScreenSetFull { max: MAX_SCREENS });
        }

        let id = ScreenId(self.next_id);
        let screen = StatusScreen::compose(id, &mut self.canvas, &self.config, &self.sources, now_ms)?;
        self.next_id = self.next_id.wrapping_add(1);

        if let Err(mut screen) = self.screens.push(screen) {
            screen.teardown(&mut self.canvas);
            return Err(StatusError::ScreenSetFull { max: MAX_SCREENS });
        }
        Ok(id)
    }

    /// Tear down a screen. Returns false if no live screen has this id.
    pub fn tear_down(&mut self, id: ScreenId) -> bool {
        let Some(position) = self.screens.iter().position(|screen| screen.id() == id) else {
            debug!("Ignoring teardown of unknown screen {:?}", id);
            return false;
        };

        let mut screen = self.screens.remove(position);
        screen.teardown(&mut self.canvas);
        true
    }

    /// Route an event to every live screen. Returns how many handlers ran.
    pub fn handle_event(&mut self, event: StatusEvent) -> usize {
        let mut ran = 0;
        for screen in self.screens.iter_mut() {
            ran += screen.on_event(event, &mut self.canvas, &self.sources);
        }
        ran
    }

    /// Fire every due tick. Returns how many fired.
    pub fn poll_ticks(&mut self, now_ms: u64) -> usize {
        let mut fired = 0;
        for screen in self.screens.iter_mut() {
            if screen.on_tick(&mut self.canvas, &self.sources, now_ms) {
                fired += 1;
            }
        }
        fired
    }

    /// Earliest pending tick across all screens
    pub fn next_tick_due(&self) -> Option<u64> {
        self.screens
            .iter()
            .filter_map(|screen| screen.next_tick_due())
            .min()
    }

    /// Redraw the canvas and flush the changed region, if anything changed.
    pub fn render(&mut self) -> Result<(), D::Error> {
        if self.canvas.is_dirty() {
            debug!("Rendering status canvas");
            let Ok(()) = self.framebuffer.clear(BLACK);
            let Ok(()) = self.canvas.draw(&mut self.framebuffer);
            self.canvas.mark_clean();
        }

        self.framebuffer.flush(&mut self.display)
    }

    /// Process one request, then render.
    pub fn process_request(&mut self, request: StatusRequest, now_ms: u64) -> Result<(), D::Error> {
        debug!("Processing request: {:?}", request);
        match request {
            StatusRequest::Event(event) => {
                self.handle_event(event);
            }
            StatusRequest::Compose => match self.compose(now_ms) {
                Ok(id) => info!("Composed status screen {:?}", id),
                Err(e) => error!("Status screen composition failed: {}", e),
            },
            StatusRequest::TearDown(id) => {
                self.tear_down(id);
            }
            StatusRequest::Redraw => {
                self.framebuffer.invalidate();
            }
        }

        self.render()
    }

    /// Process every request already queued, without waiting.
    pub fn drain(&mut self, receiver: &StatusReceiver<'_>, now_ms: u64) -> Result<usize, D::Error> {
        let mut processed = 0;
        while let Ok(request) = receiver.try_receive() {
            self.process_request(request, now_ms)?;
            processed += 1;
        }
        Ok(processed)
    }

    /// Wait for the next due tick or request and handle it.
    pub async fn run_once(&mut self, receiver: &StatusReceiver<'_>) -> Result<(), D::Error> {
        let request = match self.next_tick_due() {
            Some(due) => {
                match select(Timer::at(tick_deadline(due)), receiver.receive()).await {
                    Either::First(()) => None,
                    Either::Second(request) => Some(request),
                }
            }
            None => Some(receiver.receive().await),
        };

        let now_ms = Instant::now().as_millis();
        match request {
            Some(request) => self.process_request(request, now_ms),
            None => {
                self.poll_ticks(now_ms);
                self.render()
            }
        }
    }

    /// Run the status manager task
    ///
    /// Handles requests from the channel and due ticks forever, in arrival
    /// order.
    pub async fn run(&mut self, receiver: StatusReceiver<'_>) -> !
    where
        D::Error: core::fmt::Debug,
    {
        info!("Status manager task started");

        if let Err(e) = self.render() {
            error!("Status render error: {:?}", e);
        }

        loop {
            if let Err(e) = self.run_once(&receiver).await {
                error!("Error processing status request: {:?}", e);
            }
        }
    }
}

/// Convert a tick deadline to an embassy instant, saturating at the latest
/// representable one.
fn tick_deadline(due_ms: u64) -> Instant {
    Instant::from_millis(due_ms.min(Instant::MAX.as_millis()))
}
