use log::debug;

use super::StatusEvent;
use crate::error::{StatusError, StatusResult};
use crate::ui::Canvas;
use crate::widget::WidgetState;

/// Refresh routine run when a subscribed event arrives.
pub type Handler<C, S> = fn(&WidgetState<<C as Canvas>::Handle>, &mut C, &S);

/// Event kind to handler table, evaluated in registration order.
pub struct SubscriberTable<C: Canvas, S, const N: usize> {
    entries: heapless::Vec<(StatusEvent, Handler<C, S>), N>,
}

impl<C: Canvas, S, const N: usize> Default for SubscriberTable<C, S, N> {
    fn default() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }
}

impl<C: Canvas, S, const N: usize> SubscriberTable<C, S, N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, event: StatusEvent, handler: Handler<C, S>) -> StatusResult<()> {
        self.entries
            .push((event, handler))
            .map_err(|_| StatusError::SubscriberTableFull { max: N })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Run every handler subscribed to `event`. Returns how many ran.
    pub fn dispatch(
        &self,
        event: StatusEvent,
        state: &WidgetState<C::Handle>,
        canvas: &mut C,
        sources: &S,
    ) -> usize {
        let mut ran = 0;
        for (_, handler) in self.entries.iter().filter(|(kind, _)| *kind == event) {
            handler(state, canvas, sources);
            ran += 1;
        }

        debug!("Dispatched {:?} to {} handler(s)", event, ran);
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Placement, RetainedCanvas, Style};
    use crate::widget::Slot;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    type TestCanvas = RetainedCanvas<4>;

    fn write_a(state: &WidgetState<<TestCanvas as Canvas>::Handle>, canvas: &mut TestCanvas, _: &()) {
        state.set_time_text(canvas, "a");
    }

    fn append_b(state: &WidgetState<<TestCanvas as Canvas>::Handle>, canvas: &mut TestCanvas, _: &()) {
        if let Some(label) = state.handle(Slot::TimeLabel) {
            let mut text: heapless::String<8> = heapless::String::new();
            let _ = text.push_str(canvas.text(label).unwrap_or(""));
            let _ = text.push('b');
            canvas.set_text(label, &text);
        }
    }

    fn setup() -> (TestCanvas, WidgetState<<TestCanvas as Canvas>::Handle>) {
        let mut canvas = TestCanvas::new(Rectangle::new(Point::zero(), Size::new(128, 64)));
        let root = canvas
            .create_container(None, Size::new(128, 64), Placement::default(), Style::new())
            .unwrap();
        let label = canvas.create_label(root).unwrap();
        let mut state = WidgetState::new();
        state.bind(Slot::TimeLabel, label);
        (canvas, state)
    }

    #[test]
    fn test_dispatch_runs_in_registration_order() {
        let (mut canvas, state) = setup();
        let mut table: SubscriberTable<TestCanvas, (), 4> = SubscriberTable::new();
        table.register(StatusEvent::BatteryChanged, write_a).unwrap();
        table.register(StatusEvent::BatteryChanged, append_b).unwrap();

        let ran = table.dispatch(StatusEvent::BatteryChanged, &state, &mut canvas, &());

        assert_eq!(ran, 2);
        let label = state.handle(Slot::TimeLabel).unwrap();
        assert_eq!(canvas.text(label), Some("ab"));
    }

    #[test]
    fn test_dispatch_skips_other_events() {
        let (mut canvas, state) = setup();
        let mut table: SubscriberTable<TestCanvas, (), 4> = SubscriberTable::new();
        table.register(StatusEvent::BatteryChanged, write_a).unwrap();

        assert_eq!(table.dispatch(StatusEvent::ConnectionChanged, &state, &mut canvas, &()), 0);
    }

    #[test]
    fn test_register_fails_when_full() {
        let mut table: SubscriberTable<TestCanvas, (), 1> = SubscriberTable::new();
        table.register(StatusEvent::BatteryChanged, write_a).unwrap();

        assert_eq!(
            table.register(StatusEvent::ConnectionChanged, write_a),
            Err(StatusError::SubscriberTableFull { max: 1 })
        );
    }

    #[test]
    fn test_clear_drops_subscriptions() {
        let (mut canvas, state) = setup();
        let mut table: SubscriberTable<TestCanvas, (), 4> = SubscriberTable::new();
        table.register(StatusEvent::BatteryChanged, write_a).unwrap();
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.dispatch(StatusEvent::BatteryChanged, &state, &mut canvas, &()), 0);
    }
}
