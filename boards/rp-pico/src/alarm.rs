//! One-shot chain alarms on the RP2040 timer.

use rp_pico::hal::timer::{Alarm, Alarm0};
use traffic_light_sequencer::{AlarmScheduler, ChainStep, ScheduleError};

use crate::time::Duration;

/// [`AlarmScheduler`] over hardware alarm 0.
///
/// The hardware alarm carries no payload, so the armed step is remembered
/// here and handed back by [`take_fired`](Self::take_fired) from the
/// `TIMER_IRQ_0` handler. Only one chain link is ever armed at a time.
pub struct HardwareAlarm {
    alarm: Alarm0,
    armed: Option<ChainStep>,
}

impl HardwareAlarm {
    /// Takes alarm 0 and enables its interrupt.
    ///
    /// The `TIMER_IRQ_0` line still has to be unmasked in the NVIC.
    pub fn new(mut alarm: Alarm0) -> Self {
        alarm.enable_interrupt();
        Self { alarm, armed: None }
    }

    /// Acknowledges the alarm interrupt and returns the step that fired.
    ///
    /// Returns `None` while the alarm is still counting down, so a spurious
    /// or stale `TIMER_IRQ_0` cannot deliver a step early.
    pub fn take_fired(&mut self) -> Option<ChainStep> {
        if !self.alarm.finished() {
            return None;
        }
        self.alarm.clear_interrupt();
        self.armed.take()
    }
}

impl AlarmScheduler<Duration> for HardwareAlarm {
    fn schedule_once(&mut self, delay: Duration, step: ChainStep) -> Result<(), ScheduleError> {
        self.alarm
            .schedule(delay.into())
            .map_err(|_| ScheduleError)?;
        self.armed = Some(step);
        Ok(())
    }
}
