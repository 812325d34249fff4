//! The three traffic-light outputs.
//!
//! Provides [`TrafficLights`], a bank of three binary LEDs driven through
//! `embedded-hal` output pins, and [`LightState`], a snapshot of what the
//! bank currently shows.

use embedded_hal::digital::OutputPin;
use palette::Srgb;

/// Identity of one LED in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    /// Blue LED, first to go off.
    Blue,
    /// Red LED, second to go off.
    Red,
    /// Green LED, last to go off.
    Green,
}

impl LedColor {
    /// GPIO number the LED is wired to.
    pub const fn pin(self) -> u8 {
        match self {
            LedColor::Blue => crate::config::LED_BLUE_PIN,
            LedColor::Red => crate::config::LED_RED_PIN,
            LedColor::Green => crate::config::LED_GREEN_PIN,
        }
    }
}

/// On/off state of the three LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightState {
    /// Blue LED is lit.
    pub blue: bool,
    /// Red LED is lit.
    pub red: bool,
    /// Green LED is lit.
    pub green: bool,
}

impl LightState {
    /// All three LEDs off.
    pub const OFF: Self = Self::new(false, false, false);

    /// All three LEDs on.
    pub const ALL_ON: Self = Self::new(true, true, true);

    /// Creates a state vector in (blue, red, green) order.
    pub const fn new(blue: bool, red: bool, green: bool) -> Self {
        Self { blue, red, green }
    }

    /// Returns whether the given LED is lit.
    pub fn is_on(&self, led: LedColor) -> bool {
        match led {
            LedColor::Blue => self.blue,
            LedColor::Red => self.red,
            LedColor::Green => self.green,
        }
    }

    /// Returns true if no LED is lit.
    pub fn is_dark(&self) -> bool {
        *self == Self::OFF
    }

    /// Mixed colour seen when the three LEDs are channels of one RGB LED.
    ///
    /// The full sequence reads white, yellow, green, off.
    pub fn color(&self) -> Srgb {
        let level = |on: bool| if on { 1.0 } else { 0.0 };
        Srgb::new(level(self.red), level(self.green), level(self.blue))
    }

    fn set(&mut self, led: LedColor, on: bool) {
        match led {
            LedColor::Blue => self.blue = on,
            LedColor::Red => self.red = on,
            LedColor::Green => self.green = on,
        }
    }
}

/// Bank of three LEDs, one output pin each.
///
/// Keeps a mirror of the levels it wrote so the current state can be read
/// back without touching hardware. Pin errors are dropped: the outputs are
/// plain push-pull GPIOs and the sequencer has no way to recover from a
/// failed write anyway.
pub struct TrafficLights<B, R, G>
where
    B: OutputPin,
    R: OutputPin,
    G: OutputPin,
{
    blue: B,
    red: R,
    green: G,
    state: LightState,
}

impl<B, R, G> TrafficLights<B, R, G>
where
    B: OutputPin,
    R: OutputPin,
    G: OutputPin,
{
    /// Takes ownership of the three pins and drives them low.
    pub fn new(blue: B, red: R, green: G) -> Self {
        let mut lights = Self {
            blue,
            red,
            green,
            state: LightState::OFF,
        };
        lights.all_off();
        lights
    }

    /// Drives one LED to the requested level.
    pub fn set(&mut self, led: LedColor, on: bool) {
        let _ = match (led, on) {
            (LedColor::Blue, true) => self.blue.set_high().map_err(|_| ()),
            (LedColor::Blue, false) => self.blue.set_low().map_err(|_| ()),
            (LedColor::Red, true) => self.red.set_high().map_err(|_| ()),
            (LedColor::Red, false) => self.red.set_low().map_err(|_| ()),
            (LedColor::Green, true) => self.green.set_high().map_err(|_| ()),
            (LedColor::Green, false) => self.green.set_low().map_err(|_| ()),
        };
        self.state.set(led, on);
    }

    /// Turns a single LED off.
    #[inline]
    pub fn turn_off(&mut self, led: LedColor) {
        self.set(led, false);
    }

    /// Turns every LED on, blue first.
    pub fn all_on(&mut self) {
        self.set(LedColor::Blue, true);
        self.set(LedColor::Red, true);
        self.set(LedColor::Green, true);
    }

    /// Turns every LED off.
    pub fn all_off(&mut self) {
        self.set(LedColor::Blue, false);
        self.set(LedColor::Red, false);
        self.set(LedColor::Green, false);
    }

    /// Returns the levels last written to the pins.
    pub fn state(&self) -> LightState {
        self.state
    }

    /// Releases the pins.
    pub fn release(self) -> (B, R, G) {
        (self.blue, self.red, self.green)
    }
}
