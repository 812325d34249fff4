#![no_std]
#![no_main]

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::gpio::Interrupt;
use rp_pico::hal::pac::{self, interrupt};
use rtt_target::{rprintln, rtt_init_print};

use rp_pico_board::alarm::HardwareAlarm;
use traffic_light_sequencer::{
    LightSequencer, PressOutcome, SequenceGuard, SequencerConfig, TimeDuration,
};

mod hardware_setup;

use hardware_setup::{HardwareContext, Sequencer};

/// Set by an accepted press, cleared by the last alarm of the chain.
static GUARD: SequenceGuard = SequenceGuard::new();

/// State shared by the GPIO and timer interrupt handlers
struct App {
    sequencer: Sequencer,
    alarm: HardwareAlarm,
}

static APP: Mutex<RefCell<Option<App>>> = Mutex::new(RefCell::new(None));

/// Button edge: debounce, then start the sequence if idle
#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        let mut app = APP.borrow_ref_mut(cs);
        let Some(App { sequencer, alarm }) = app.as_mut() else {
            return;
        };

        if !sequencer.button_mut().interrupt_status(Interrupt::EdgeLow) {
            return;
        }

        let outcome = sequencer.on_button_edge(alarm);

        // Edges latched by contact bounce during the debounce window are dropped.
        sequencer.button_mut().clear_interrupt(Interrupt::EdgeLow);

        match outcome {
            PressOutcome::Started => rprintln!("Press accepted - all LEDs on"),
            PressOutcome::Busy => rprintln!("Press ignored - sequence running"),
            PressOutcome::Bounce => rprintln!("Press rejected - bounce"),
            PressOutcome::AlarmFailed => rprintln!("Press dropped - alarm could not be armed"),
        }
    });
}

/// Chain alarm: turn the next LED off
#[interrupt]
fn TIMER_IRQ_0() {
    critical_section::with(|cs| {
        let mut app = APP.borrow_ref_mut(cs);
        let Some(App { sequencer, alarm }) = app.as_mut() else {
            return;
        };

        let Some(step) = alarm.take_fired() else {
            return;
        };

        match sequencer.on_alarm(step, alarm) {
            Ok(phase) => rprintln!(
                "Step {} done - {:?} (GPIO{}) off, phase {:?}",
                step.number(),
                step.led(),
                step.led().pin(),
                phase
            ),
            Err(e) => rprintln!("Alarm error: {}", e),
        }
    });
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Traffic Light Sequencer ===");
    rprintln!("Starting initialization...");

    let HardwareContext {
        lights,
        button,
        timer,
        alarm,
    } = hardware_setup::init_hardware();

    let config = SequencerConfig::default();
    let sequencer = LightSequencer::new(lights, button, timer, &GUARD, config);
    let alarm = HardwareAlarm::new(alarm);

    critical_section::with(|cs| {
        APP.borrow(cs).replace(Some(App { sequencer, alarm }));
    });

    // SAFETY: both handlers only touch APP, which is initialized above.
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
    }

    rprintln!("=== System Ready ===");
    rprintln!(
        "Press the button: all LEDs on, then blue, red and green go off {} ms apart ({} ms total)",
        config.step_delay.as_millis(),
        config.sequence_length().as_millis()
    );

    let mut delay = timer;
    loop {
        delay.delay_ms(config.idle_tick_ms);
    }
}
