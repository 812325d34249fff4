#![no_std]

//! RP2040 glue for the traffic-light sequencer: a fugit-backed duration and
//! a one-shot alarm scheduler over the hardware timer.

pub mod alarm;
pub mod time;
