use log::debug;

/// Cancellable repeating deadline, driven by whoever owns the clock.
///
/// The tick never sleeps on its own. The owning loop asks [`next_due`] when
/// to wake up and calls [`poll`] with the current time; a due tick reschedules
/// itself one interval after `now`, so a late wake-up never fires a burst of
/// catch-up ticks.
///
/// [`next_due`]: PeriodicTick::next_due
/// [`poll`]: PeriodicTick::poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTick {
    interval_ms: u64,
    next_due: Option<u64>,
}

impl PeriodicTick {
    /// A disarmed tick with the given period.
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            next_due: None,
        }
    }

    /// Schedule the first firing one interval after `now`.
    pub fn arm(&mut self, now_ms: u64) {
        self.next_due = Some(now_ms.saturating_add(self.interval_ms));
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Deadline of the next firing, `None` once cancelled.
    pub fn next_due(&self) -> Option<u64> {
        self.next_due
    }

    /// Fire if due. Returns whether the tick fired.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due {
            Some(due) if now_ms >= due => {
                self.next_due = Some(now_ms.saturating_add(self.interval_ms));
                true
            }
            _ => false,
        }
    }

    /// Drop the pending firing. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.next_due.take().is_some();
        if was_armed {
            debug!("Periodic tick cancelled");
        }
        was_armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_tick_never_fires() {
        let mut tick = PeriodicTick::new(1000);
        assert!(!tick.poll(u64::MAX));
        assert_eq!(tick.next_due(), None);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut tick = PeriodicTick::new(1000);
        tick.arm(0);

        assert!(!tick.poll(999));
        assert!(tick.poll(1000));
        assert!(!tick.poll(1000));
        assert_eq!(tick.next_due(), Some(2000));
    }

    #[test]
    fn test_late_poll_reschedules_from_now() {
        let mut tick = PeriodicTick::new(1000);
        tick.arm(0);

        assert!(tick.poll(5500));
        assert_eq!(tick.next_due(), Some(6500));
        assert!(!tick.poll(6000));
    }

    #[test]
    fn test_cancel_stops_future_firings() {
        let mut tick = PeriodicTick::new(1000);
        tick.arm(0);

        assert!(tick.cancel());
        assert!(!tick.cancel());
        assert!(!tick.poll(10_000));
        assert!(!tick.is_armed());
    }
}
