//! Detection of a missing battery from rapid charge status toggling
//!
//! Without a battery the charger cycles between charge phases, raising a
//! `CHARGE_STATUS_CHANGE` interrupt each time. Ten of those within four seconds are taken to mean
//! the battery was removed.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::{InterruptCode, WriteRequest};

/// Number of charge status changes the monitor looks at
pub const TOGGLE_WINDOW: usize = 10;
/// Span within which a full window counts as rapid toggling
pub const TOGGLE_SPAN_MS: u64 = 4000;

/// What the monitor concluded from the latest event
#[derive(Clone, Debug, PartialEq)]
pub enum ToggleVerdict {
    /// Nothing to do
    Normal,
    /// Toggling too fast, charging should be disabled with `write`
    RemovalSuspected { span_ms: u64, write: WriteRequest },
}

/// Ring of the most recent charge status change timestamps
#[derive(Clone, Debug, Default)]
pub struct ChargeToggleMonitor {
    stamps: VecDeque<u64>,
}

impl ChargeToggleMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stamps: VecDeque::with_capacity(TOGGLE_WINDOW),
        }
    }

    /// Feed the events of one interrupt; only `CHARGE_STATUS_CHANGE` is counted
    pub fn observe(&mut self, events: &[InterruptCode], now_ms: u64) -> ToggleVerdict {
        if events.contains(&InterruptCode::ChargeStatusChange) {
            self.record(now_ms)
        } else {
            ToggleVerdict::Normal
        }
    }

    /// Record one charge status change at `now_ms`
    ///
    /// Timestamps come from a monotonic millisecond clock owned by the caller.
    pub fn record(&mut self, now_ms: u64) -> ToggleVerdict {
        if self.stamps.len() == TOGGLE_WINDOW {
            self.stamps.pop_front();
        }
        self.stamps.push_back(now_ms);
        if self.stamps.len() < TOGGLE_WINDOW {
            return ToggleVerdict::Normal;
        }

        let (Some(oldest), Some(newest)) = (self.stamps.front(), self.stamps.back()) else {
            return ToggleVerdict::Normal;
        };
        let span_ms = newest.saturating_sub(*oldest);
        if span_ms >= TOGGLE_SPAN_MS {
            debug!("{TOGGLE_WINDOW} charge status changes in {span_ms} ms, not toggling");
            return ToggleVerdict::Normal;
        }

        warn!("{TOGGLE_WINDOW} charge status changes in {span_ms} ms, battery removal suspected");
        self.stamps.clear();
        ToggleVerdict::RemovalSuspected {
            span_ms,
            write: WriteRequest {
                register: "EN_CHG",
                value: 0.,
            },
        }
    }

    /// Number of timestamps currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_toggling_trips_and_resets() {
        let mut monitor = ChargeToggleMonitor::new();
        for t in 0..9 {
            assert_eq!(monitor.record(t * 100), ToggleVerdict::Normal);
        }
        let verdict = monitor.record(900);
        assert_eq!(
            verdict,
            ToggleVerdict::RemovalSuspected {
                span_ms: 900,
                write: WriteRequest {
                    register: "EN_CHG",
                    value: 0.
                }
            }
        );
        assert!(monitor.is_empty());
    }

    #[test]
    fn slow_toggling_does_not_trip() {
        let mut monitor = ChargeToggleMonitor::new();
        for t in 0..30 {
            assert_eq!(monitor.record(t * 500), ToggleVerdict::Normal);
        }
        assert_eq!(monitor.len(), TOGGLE_WINDOW);
    }

    #[test]
    fn span_of_exactly_four_seconds_does_not_trip() {
        let mut monitor = ChargeToggleMonitor::new();
        for t in 0..9 {
            monitor.record(t);
        }
        assert_eq!(monitor.record(TOGGLE_SPAN_MS), ToggleVerdict::Normal);
    }

    #[test]
    fn old_events_slide_out_of_the_window() {
        let mut monitor = ChargeToggleMonitor::new();
        monitor.record(0);
        for t in 1..10 {
            monitor.record(10_000 + t);
        }
        assert_eq!(monitor.len(), TOGGLE_WINDOW);
        assert!(matches!(
            monitor.record(10_010),
            ToggleVerdict::RemovalSuspected { span_ms: 9, .. }
        ));
    }

    #[test]
    fn only_charge_status_changes_count() {
        let mut monitor = ChargeToggleMonitor::new();
        for t in 0..20 {
            monitor.observe(&[InterruptCode::VbusPresenceChange], t);
        }
        assert!(monitor.is_empty());
        for t in 0..9 {
            monitor.observe(
                &[InterruptCode::IindpmEvent, InterruptCode::ChargeStatusChange],
                t,
            );
        }
        assert!(matches!(
            monitor.observe(&[InterruptCode::ChargeStatusChange], 9),
            ToggleVerdict::RemovalSuspected { .. }
        ));
    }
}
