//! Virtual-time alarm queue for host-side simulation.
//!
//! [`SoftwareAlarms`] implements [`AlarmScheduler`] on top of a millisecond
//! counter that only moves when told to. It lets the whole light sequence be
//! driven deterministically without a hardware timer.

use crate::chain::{AlarmScheduler, ChainStep, ScheduleError};
use crate::time::TimeDuration;
use heapless::Vec;

/// An armed alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingAlarm {
    /// Virtual time, in milliseconds, at which the alarm becomes due.
    pub due_ms: u64,
    /// Step to deliver.
    pub step: ChainStep,
}

/// Bounded queue of one-shot alarms on a virtual clock.
///
/// Alarms are delivered no earlier than their due time and, among alarms due
/// at the same instant, in the order they were armed. Scheduling into a full
/// queue fails with [`ScheduleError`].
#[derive(Debug)]
pub struct SoftwareAlarms<D: TimeDuration, const N: usize> {
    now_ms: u64,
    pending: Vec<PendingAlarm, N>,
    _duration: core::marker::PhantomData<D>,
}

impl<D: TimeDuration, const N: usize> SoftwareAlarms<D, N> {
    /// Creates an empty queue at virtual time zero.
    pub const fn new() -> Self {
        Self {
            now_ms: 0,
            pending: Vec::new(),
            _duration: core::marker::PhantomData,
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, by: D) {
        self.now_ms = self.now_ms.saturating_add(by.as_millis());
    }

    /// Moves the clock to an absolute time. Never moves it backwards.
    pub fn advance_to(&mut self, at_ms: u64) {
        self.now_ms = self.now_ms.max(at_ms);
    }

    /// Removes and returns the earliest alarm that is due, if any.
    pub fn pop_due(&mut self) -> Option<ChainStep> {
        let now = self.now_ms;
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, alarm)| alarm.due_ms <= now)
            .min_by_key(|(i, alarm)| (alarm.due_ms, *i))
            .map(|(i, _)| i)?;

        Some(self.pending.remove(index).step)
    }

    /// Due time of the earliest armed alarm.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|alarm| alarm.due_ms).min()
    }

    /// Armed alarms in the order they were scheduled.
    pub fn pending(&self) -> &[PendingAlarm] {
        &self.pending
    }

    /// Returns true if nothing is armed.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<D: TimeDuration, const N: usize> Default for SoftwareAlarms<D, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: TimeDuration, const N: usize> AlarmScheduler<D> for SoftwareAlarms<D, N> {
    fn schedule_once(&mut self, delay: D, step: ChainStep) -> Result<(), ScheduleError> {
        let alarm = PendingAlarm {
            due_ms: self.now_ms.saturating_add(delay.as_millis()),
            step,
        };
        self.pending.push(alarm).map_err(|_| ScheduleError)
    }
}
