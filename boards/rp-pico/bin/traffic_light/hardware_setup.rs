use rp_pico::hal::{
    Clock, Sio, Timer,
    clocks::init_clocks_and_plls,
    gpio::{FunctionSioInput, FunctionSioOutput, Interrupt, Pin, PullDown, PullUp, bank0},
    pac,
    timer::Alarm0,
    watchdog::Watchdog,
};
use rtt_target::rprintln;

use rp_pico_board::time::Duration;
use traffic_light_sequencer::{BUTTON_PIN, LedColor, LightSequencer, TrafficLights};

/// Blue channel of the RGB LED (GPIO11)
pub type BlueLed = Pin<bank0::Gpio11, FunctionSioOutput, PullDown>;

/// Red channel of the RGB LED (GPIO12)
pub type RedLed = Pin<bank0::Gpio12, FunctionSioOutput, PullDown>;

/// Green channel of the RGB LED (GPIO13)
pub type GreenLed = Pin<bank0::Gpio13, FunctionSioOutput, PullDown>;

/// Push button A (GPIO5, active low)
pub type Button = Pin<bank0::Gpio5, FunctionSioInput, PullUp>;

/// Sequencer over the board's pins, debouncing with the hardware timer
pub type Sequencer =
    LightSequencer<'static, BlueLed, RedLed, GreenLed, Button, Timer, Duration>;

/// Container for all initialized hardware peripherals
pub struct HardwareContext {
    pub lights: TrafficLights<BlueLed, RedLed, GreenLed>,
    pub button: Button,
    pub timer: Timer,
    pub alarm: Alarm0,
}

/// Initialize all hardware peripherals
///
/// - Clocks (125 MHz system clock)
/// - LED pins as push-pull outputs, driven low
/// - Button pin as pulled-up input with a falling-edge interrupt
/// - Hardware timer and its first alarm
///
/// Interrupt lines are left masked; unmask them once the shared state is in place.
pub fn init_hardware() -> HardwareContext {
    let mut pac = pac::Peripherals::take().unwrap();

    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    rprintln!(
        "System clock configured: {} Hz",
        clocks.system_clock.freq().to_Hz()
    );

    let sio = Sio::new(pac.SIO);
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let lights = TrafficLights::new(
        pins.gpio11.into_push_pull_output(),
        pins.gpio12.into_push_pull_output(),
        pins.gpio13.into_push_pull_output(),
    );
    rprintln!(
        "LEDs configured on GPIO{} (B), GPIO{} (R), GPIO{} (G)",
        LedColor::Blue.pin(),
        LedColor::Red.pin(),
        LedColor::Green.pin()
    );

    let button = setup_button(pins.gpio5.into_pull_up_input());

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let alarm = timer.alarm_0().unwrap();

    HardwareContext {
        lights,
        button,
        timer,
        alarm,
    }
}

/// Arm the falling-edge interrupt of the button
fn setup_button(mut button: Button) -> Button {
    button.clear_interrupt(Interrupt::EdgeLow);
    button.set_interrupt_enabled(Interrupt::EdgeLow, true);

    rprintln!("Button configured on GPIO{} (pull-up, falling edge)", BUTTON_PIN);
    button
}
