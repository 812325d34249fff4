#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LightSequencer`**: Owns the LEDs and the button, reacts to button edges and chain alarms
//! - **`SequenceGuard`**: Atomic "sequence in flight" flag shared by the interrupt and alarm contexts
//! - **`Debouncer`**: Blocking press confirmation (wait the window out, sample once)
//! - **`ChainStep`** / **`CHAIN`**: The alarm chain as data, one LED per step
//! - **`AlarmScheduler`**: Trait to implement for your platform's one-shot alarm
//! - **`TrafficLights`** / **`LightState`**: The three LED outputs and their current levels
//! - **`SoftwareAlarms`**: Virtual-time alarm queue for host-side simulation
//!
//! LEDs, the button and the debounce delay are plain `embedded-hal` 1.0 traits,
//! so any HAL can drive the sequencer.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod chain;
pub mod config;
pub mod debounce;
pub mod guard;
pub mod led;
pub mod sequencer;
pub mod sim;
pub mod time;

pub use chain::{AlarmScheduler, CHAIN, CHAIN_LEN, ChainLink, ChainStep, ScheduleError};
pub use config::{
    BUTTON_PIN, DEBOUNCE_TIME_MS, IDLE_TICK_MS, LED_BLUE_PIN, LED_DELAY_MS, LED_GREEN_PIN,
    LED_RED_PIN, SequencerConfig,
};
pub use debounce::Debouncer;
pub use guard::SequenceGuard;
pub use led::{LedColor, LightState, TrafficLights};
pub use sequencer::{LightSequencer, Phase, PressOutcome, SequencerError};
pub use sim::{PendingAlarm, SoftwareAlarms};
pub use time::{Millis, TimeDuration};
