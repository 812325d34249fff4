//! The alarm chain that dims the lights one LED at a time.
//!
//! The chain is a fixed table of [`ChainLink`]s. Each link names the LED it
//! extinguishes and the link to schedule after it, so a step can be executed
//! and inspected without a platform timer.

use crate::led::LedColor;
use crate::time::TimeDuration;

/// Number of links in the chain.
pub const CHAIN_LEN: usize = 3;

/// One pending alarm of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChainStep {
    /// First alarm: blue off.
    First,
    /// Second alarm: red off.
    Second,
    /// Last alarm: green off, sequence done.
    Last,
}

/// Static description of a chain step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink {
    /// LED turned off when the alarm fires.
    pub led: LedColor,
    /// Step scheduled afterwards, `None` for the terminal step.
    pub next: Option<ChainStep>,
}

/// The chain, in firing order.
pub const CHAIN: [ChainLink; CHAIN_LEN] = [
    ChainLink {
        led: LedColor::Blue,
        next: Some(ChainStep::Second),
    },
    ChainLink {
        led: LedColor::Red,
        next: Some(ChainStep::Last),
    },
    ChainLink {
        led: LedColor::Green,
        next: None,
    },
];

impl ChainStep {
    /// Entry point of the chain, scheduled by an accepted press.
    pub const START: ChainStep = ChainStep::First;

    /// Zero-based position within the chain.
    pub const fn index(self) -> usize {
        match self {
            ChainStep::First => 0,
            ChainStep::Second => 1,
            ChainStep::Last => 2,
        }
    }

    /// One-based step number as used in the running phase.
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Table entry of this step.
    pub const fn link(self) -> ChainLink {
        CHAIN[self.index()]
    }

    /// LED this step turns off.
    pub const fn led(self) -> LedColor {
        self.link().led
    }

    /// Step that follows this one.
    pub const fn next(self) -> Option<ChainStep> {
        self.link().next
    }

    /// Returns true for the step that ends the sequence.
    pub const fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

/// The platform refused to arm an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleError;

impl core::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "alarm could not be armed")
    }
}

/// One-shot alarm facility of the platform.
///
/// `schedule_once` arms a single alarm that fires no earlier than `delay`
/// from now and then delivers `step` back to
/// [`LightSequencer::on_alarm`](crate::LightSequencer::on_alarm). It is
/// fire-and-forget: no handle is returned and the alarm is never re-armed
/// implicitly.
pub trait AlarmScheduler<D: TimeDuration> {
    /// Arms a one-shot alarm for `step` after `delay`.
    fn schedule_once(&mut self, delay: D, step: ChainStep) -> Result<(), ScheduleError>;
}
