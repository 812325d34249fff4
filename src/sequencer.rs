//! Traffic-light sequencer tying the button, the guard and the alarm chain together.
//!
//! Provides [`LightSequencer`], which owns the LED bank and the button, and
//! exposes one entry point per asynchronous context: [`on_button_edge`] for
//! the GPIO interrupt and [`on_alarm`] for the one-shot alarm.
//!
//! [`on_button_edge`]: LightSequencer::on_button_edge
//! [`on_alarm`]: LightSequencer::on_alarm

use crate::chain::{AlarmScheduler, ChainStep, ScheduleError};
use crate::config::SequencerConfig;
use crate::debounce::Debouncer;
use crate::guard::SequenceGuard;
use crate::led::{LightState, TrafficLights};
use crate::time::TimeDuration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Where the sequencer is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No sequence in flight. All LEDs off, next press is accepted.
    Idle,
    /// Sequence in flight, waiting for the given alarm.
    Running(ChainStep),
}

impl Phase {
    /// One-based step number while running, `None` when idle.
    pub fn step_number(&self) -> Option<u8> {
        match self {
            Phase::Idle => None,
            Phase::Running(step) => Some(step.number()),
        }
    }
}

/// What a button edge led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome {
    /// Press accepted: all LEDs on, first alarm armed.
    Started,
    /// A sequence was already running; nothing changed.
    Busy,
    /// The button was released within the debounce window; nothing changed.
    Bounce,
    /// The first alarm could not be armed; LEDs and guard were reset to idle.
    AlarmFailed,
}

/// Errors that can occur when an alarm is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// The alarm does not match the step the chain is waiting for.
    UnexpectedStep {
        /// The step the chain armed last
        expected: ChainStep,
        /// The step that was delivered
        actual: ChainStep,
    },
    /// An alarm arrived while no sequence was running.
    NotRunning {
        /// The step that was delivered
        actual: ChainStep,
    },
    /// The next alarm could not be armed; the sequence was reset to idle.
    ScheduleFailed {
        /// The step that could not be armed
        step: ChainStep,
    },
}

impl core::fmt::Display for SequencerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequencerError::UnexpectedStep { expected, actual } => {
                write!(
                    f,
                    "unexpected alarm: chain is waiting for {:?}, got {:?}",
                    expected, actual
                )
            }
            SequencerError::NotRunning { actual } => {
                write!(f, "alarm {:?} delivered while no sequence is running", actual)
            }
            SequencerError::ScheduleFailed { step } => {
                write!(f, "could not arm alarm {:?}, sequence reset", step)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequencerError {}

/// Drives the three traffic-light LEDs from button presses.
///
/// An accepted press turns every LED on and arms the first alarm. Each alarm
/// turns one LED off and arms the next, and the last one releases the
/// [`SequenceGuard`]. Presses while a sequence runs are ignored, and a running
/// sequence cannot be cancelled. If the platform refuses to arm an alarm the
/// sequence is abandoned: every LED goes off and the guard is released, so
/// the next press starts over instead of being ignored forever.
///
/// # Type Parameters
/// * `'g` - Lifetime of the guard reference (usually `'static`)
/// * `B`, `R`, `G` - Blue, red and green output pins
/// * `P` - Button input pin (active low)
/// * `Dl` - Blocking delay used for the debounce window
/// * `D` - Duration type of the platform's alarms
pub struct LightSequencer<'g, B, R, G, P, Dl, D>
where
    B: OutputPin,
    R: OutputPin,
    G: OutputPin,
    P: InputPin,
    Dl: DelayNs,
    D: TimeDuration,
{
    lights: TrafficLights<B, R, G>,
    button: P,
    delay: Dl,
    guard: &'g SequenceGuard,
    debouncer: Debouncer,
    step_delay: D,
    pending: Option<ChainStep>,
}

impl<'g, B, R, G, P, Dl, D> LightSequencer<'g, B, R, G, P, Dl, D>
where
    B: OutputPin,
    R: OutputPin,
    G: OutputPin,
    P: InputPin,
    Dl: DelayNs,
    D: TimeDuration,
{
    /// Creates an idle sequencer. The LEDs were driven off by [`TrafficLights::new`].
    pub fn new(
        lights: TrafficLights<B, R, G>,
        button: P,
        delay: Dl,
        guard: &'g SequenceGuard,
        config: SequencerConfig<D>,
    ) -> Self {
        Self {
            lights,
            button,
            delay,
            guard,
            debouncer: Debouncer::new(config.debounce_ms),
            step_delay: config.step_delay,
            pending: None,
        }
    }

    /// Handles a falling edge on the button pin.
    ///
    /// Blocks for the debounce window unless a sequence is already running.
    /// A rejected edge leaves the guard and the LEDs exactly as they were.
    pub fn on_button_edge<S: AlarmScheduler<D>>(&mut self, alarms: &mut S) -> PressOutcome {
        if self.guard.is_active() {
            return PressOutcome::Busy;
        }

        if !self.debouncer.confirm(&mut self.button, &mut self.delay) {
            return PressOutcome::Bounce;
        }

        // Another context may have started a sequence during the window.
        if !self.guard.try_activate() {
            return PressOutcome::Busy;
        }

        self.lights.all_on();
        self.pending = Some(ChainStep::START);
        match self.arm(ChainStep::START, alarms) {
            Ok(()) => PressOutcome::Started,
            Err(_) => PressOutcome::AlarmFailed,
        }
    }

    /// Handles a fired chain alarm and returns the resulting phase.
    ///
    /// Turns the step's LED off, then either arms the next step or, for the
    /// last one, releases the guard. Alarms that do not match the pending
    /// step are rejected without side effects.
    pub fn on_alarm<S: AlarmScheduler<D>>(
        &mut self,
        step: ChainStep,
        alarms: &mut S,
    ) -> Result<Phase, SequencerError> {
        let expected = self
            .pending
            .ok_or(SequencerError::NotRunning { actual: step })?;

        if step != expected {
            return Err(SequencerError::UnexpectedStep {
                expected,
                actual: step,
            });
        }

        self.lights.turn_off(step.led());

        match step.next() {
            Some(next) => {
                self.pending = Some(next);
                self.arm(next, alarms)
                    .map_err(|_| SequencerError::ScheduleFailed { step: next })?;
                Ok(Phase::Running(next))
            }
            None => {
                self.pending = None;
                self.guard.deactivate();
                Ok(Phase::Idle)
            }
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        match self.pending {
            Some(step) => Phase::Running(step),
            None => Phase::Idle,
        }
    }

    /// Returns true while a sequence is in flight.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the current LED levels.
    pub fn light_state(&self) -> LightState {
        self.lights.state()
    }

    /// Mutable access to the button pin, e.g. to acknowledge its interrupt.
    pub fn button_mut(&mut self) -> &mut P {
        &mut self.button
    }

    /// Arms `step`, or abandons the sequence if the platform refuses.
    fn arm<S: AlarmScheduler<D>>(
        &mut self,
        step: ChainStep,
        alarms: &mut S,
    ) -> Result<(), ScheduleError> {
        alarms.schedule_once(self.step_delay, step).inspect_err(|_| {
            self.lights.all_off();
            self.pending = None;
            self.guard.deactivate();
        })
    }
}
