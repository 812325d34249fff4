//! Hardware timer duration for traffic-light-sequencer time traits.
//!
//! The RP2040 alarms take a 32-bit microsecond countdown, so the duration is
//! stored in that form and clamped to its range (a little over 71 minutes).

use fugit::MicrosDurationU32;
use traffic_light_sequencer::TimeDuration;

const MAX_MILLIS: u64 = (u32::MAX / 1_000) as u64;

/// Duration type backed by fugit microsecond duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(MicrosDurationU32);

impl TimeDuration for Duration {
    fn as_millis(&self) -> u64 {
        self.0.to_millis() as u64
    }

    fn from_millis(millis: u64) -> Self {
        Duration(MicrosDurationU32::millis(millis.min(MAX_MILLIS) as u32))
    }
}

impl From<Duration> for MicrosDurationU32 {
    fn from(duration: Duration) -> Self {
        duration.0
    }
}
