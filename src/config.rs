//! Pin assignment and timing configuration.
//!
//! The pin numbers match the BitDogLab wiring of the RP2040 board: the three
//! channels of the on-board RGB LED and push button A.

use crate::time::TimeDuration;

/// GPIO of the blue LED channel.
pub const LED_BLUE_PIN: u8 = 11;
/// GPIO of the red LED channel.
pub const LED_RED_PIN: u8 = 12;
/// GPIO of the green LED channel.
pub const LED_GREEN_PIN: u8 = 13;
/// GPIO of the push button (active low, pull-up).
pub const BUTTON_PIN: u8 = 5;

/// Delay between two consecutive steps of the light chain.
pub const LED_DELAY_MS: u64 = 3000;
/// Quiescence window the button must stay pressed for.
pub const DEBOUNCE_TIME_MS: u32 = 50;
/// Sleep period of the foreground idle loop.
pub const IDLE_TICK_MS: u32 = 1000;

/// Runtime timing configuration of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerConfig<D: TimeDuration> {
    /// Delay between scheduling a chain link and it firing.
    pub step_delay: D,
    /// Debounce window, in milliseconds.
    pub debounce_ms: u32,
    /// Sleep period of the platform's foreground loop, in milliseconds.
    pub idle_tick_ms: u32,
}

impl<D: TimeDuration> SequencerConfig<D> {
    /// Creates a configuration with the given step delay and the default
    /// debounce and idle periods.
    pub fn with_step_delay(step_delay: D) -> Self {
        Self {
            step_delay,
            ..Self::default()
        }
    }

    /// Total time from an accepted press until the last LED turns off.
    pub fn sequence_length(&self) -> D {
        D::from_millis(self.step_delay.as_millis() * crate::chain::CHAIN_LEN as u64)
    }
}

impl<D: TimeDuration> Default for SequencerConfig<D> {
    fn default() -> Self {
        Self {
            step_delay: D::from_millis(LED_DELAY_MS),
            debounce_ms: DEBOUNCE_TIME_MS,
            idle_tick_ms: IDLE_TICK_MS,
        }
    }
}
