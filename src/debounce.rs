//! Blocking press confirmation for an active-low button.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Confirms a falling edge by waiting out the contact bounce.
///
/// [`confirm`](Self::confirm) blocks the calling context for the whole window
/// and samples the pin once afterwards. When called from the GPIO interrupt,
/// that interrupt path is stalled for the window; the foreground loop and
/// other interrupts are not. A rejected edge is dropped, not retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    window_ms: u32,
}

impl Debouncer {
    /// Creates a debouncer with the given quiescence window.
    pub const fn new(window_ms: u32) -> Self {
        Self { window_ms }
    }

    /// Quiescence window in milliseconds.
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Waits the window out, then returns true if the button still reads low.
    ///
    /// A pin read error counts as released.
    pub fn confirm<P, D>(&self, button: &mut P, delay: &mut D) -> bool
    where
        P: InputPin,
        D: DelayNs,
    {
        delay.delay_ms(self.window_ms);
        button.is_low().unwrap_or(false)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(crate::config::DEBOUNCE_TIME_MS)
    }
}
