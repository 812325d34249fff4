//! Shared test infrastructure for traffic-light-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use traffic_light_sequencer::{
    AlarmScheduler, ChainStep, LedColor, LightSequencer, LightState, Millis, PressOutcome,
    ScheduleError, SequenceGuard, SequencerConfig, SequencerError, SoftwareAlarms, TrafficLights,
};

// ============================================================================
// Shared Virtual Clock
// ============================================================================

/// Millisecond clock shared by the delay, the button and the alarm queue
#[derive(Clone, Default)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    /// Moves the clock forward to `at`, never backwards
    pub fn advance_to(&self, at: u64) {
        if at > self.0.get() {
            self.0.set(at);
        }
    }
}

// ============================================================================
// Mock LED Pins
// ============================================================================

/// A single pin write, stamped with virtual time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub at: u64,
    pub led: LedColor,
    pub high: bool,
}

pub type WriteLog = Rc<RefCell<heapless::Vec<Write, 128>>>;

/// Mock output pin that records every write
pub struct MockLedPin {
    led: LedColor,
    level: Rc<Cell<bool>>,
    clock: Clock,
    log: WriteLog,
}

impl MockLedPin {
    fn write(&mut self, high: bool) {
        self.level.set(high);
        let _ = self.log.borrow_mut().push(Write {
            at: self.clock.now(),
            led: self.led,
            high,
        });
    }
}

impl ErrorType for MockLedPin {
    type Error = Infallible;
}

impl OutputPin for MockLedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Active-low button whose level follows scripted press intervals
pub struct MockButton {
    clock: Clock,
    presses: Rc<RefCell<heapless::Vec<(u64, u64), 64>>>,
}

impl MockButton {
    fn pressed(&self) -> bool {
        let now = self.clock.now();
        self.presses
            .borrow()
            .iter()
            .any(|&(start, end)| start <= now && now < end)
    }
}

impl ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed())
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Blocking delay that moves the virtual clock
pub struct MockDelay {
    clock: Clock,
    remainder_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let total = self.remainder_ns + ns as u64;
        self.remainder_ns = total % 1_000_000;
        let now = self.clock.now();
        self.clock.advance_to(now + total / 1_000_000);
    }
}

// ============================================================================
// Alarm Queue On The Shared Clock
// ============================================================================

/// Software alarm queue kept in step with the shared clock
pub struct SimAlarms {
    clock: Clock,
    pub queue: SoftwareAlarms<Millis, 4>,
    pub scheduled: u32,
}

impl AlarmScheduler<Millis> for SimAlarms {
    fn schedule_once(&mut self, delay: Millis, step: ChainStep) -> Result<(), ScheduleError> {
        self.queue.advance_to(self.clock.now());
        self.queue.schedule_once(delay, step)?;
        self.scheduled += 1;
        Ok(())
    }
}

// ============================================================================
// Test Bench
// ============================================================================

pub type BenchSequencer =
    LightSequencer<'static, MockLedPin, MockLedPin, MockLedPin, MockButton, MockDelay, Millis>;

/// Complete simulated board: three LEDs, a button, a delay and an alarm queue
pub struct Bench {
    pub clock: Clock,
    pub guard: &'static SequenceGuard,
    pub sequencer: BenchSequencer,
    pub alarms: SimAlarms,
    pub log: WriteLog,
    pub alarm_errors: u32,
    levels: [Rc<Cell<bool>>; 3],
    presses: Rc<RefCell<heapless::Vec<(u64, u64), 64>>>,
}

impl Bench {
    pub fn new() -> Self {
        Self::with_config(SequencerConfig::default())
    }

    pub fn with_config(config: SequencerConfig<Millis>) -> Self {
        let clock = Clock::default();
        let log: WriteLog = Rc::new(RefCell::new(heapless::Vec::new()));
        let levels = [
            Rc::new(Cell::new(true)),
            Rc::new(Cell::new(true)),
            Rc::new(Cell::new(true)),
        ];
        let pin = |led: LedColor, level: &Rc<Cell<bool>>| MockLedPin {
            led,
            level: Rc::clone(level),
            clock: clock.clone(),
            log: Rc::clone(&log),
        };
        let lights = TrafficLights::new(
            pin(LedColor::Blue, &levels[0]),
            pin(LedColor::Red, &levels[1]),
            pin(LedColor::Green, &levels[2]),
        );

        let presses = Rc::new(RefCell::new(heapless::Vec::new()));
        let button = MockButton {
            clock: clock.clone(),
            presses: Rc::clone(&presses),
        };
        let delay = MockDelay {
            clock: clock.clone(),
            remainder_ns: 0,
        };

        // Each bench gets its own guard; leaking keeps the borrow 'static.
        let guard: &'static SequenceGuard = Box::leak(Box::new(SequenceGuard::new()));
        let sequencer = LightSequencer::new(lights, button, delay, guard, config);

        Self {
            alarms: SimAlarms {
                clock: clock.clone(),
                queue: SoftwareAlarms::new(),
                scheduled: 0,
            },
            clock,
            guard,
            sequencer,
            log,
            alarm_errors: 0,
            levels,
            presses,
        }
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// LED levels as seen on the pins
    pub fn lights(&self) -> LightState {
        LightState::new(
            self.levels[0].get(),
            self.levels[1].get(),
            self.levels[2].get(),
        )
    }

    /// Number of pin writes recorded so far
    pub fn writes(&self) -> usize {
        self.log.borrow().len()
    }

    /// Time of the first write of `high` to `led` at or after `since`
    pub fn write_time(&self, led: LedColor, high: bool, since: u64) -> Option<u64> {
        self.log
            .borrow()
            .iter()
            .find(|w| w.led == led && w.high == high && w.at >= since)
            .map(|w| w.at)
    }

    /// Fires every alarm due up to `until`, then sets the clock to `until`
    pub fn run_until(&mut self, until: u64) {
        while let Some(due) = self.alarms.queue.next_due_ms() {
            if due > until {
                break;
            }
            self.clock.advance_to(due);
            self.alarms.queue.advance_to(due);
            if let Some(step) = self.alarms.queue.pop_due() {
                self.fire(step);
            }
        }
        self.clock.advance_to(until);
        self.alarms.queue.advance_to(until);
    }

    fn fire(&mut self, step: ChainStep) {
        let result: Result<_, SequencerError> = self.sequencer.on_alarm(step, &mut self.alarms);
        if result.is_err() {
            self.alarm_errors += 1;
        }
    }

    /// Presses the button at `at` for `hold_ms` and delivers the falling edge
    pub fn press(&mut self, at: u64, hold_ms: u64) -> PressOutcome {
        self.run_until(at);
        let _ = self.presses.borrow_mut().push((at, at + hold_ms));
        self.sequencer.on_button_edge(&mut self.alarms)
    }

    /// Presses and holds long enough to pass the debounce window
    pub fn click(&mut self, at: u64) -> PressOutcome {
        self.press(at, 200)
    }
}
