//! Time abstraction for platform-agnostic alarm delays.

/// Trait abstraction for duration types.
///
/// The sequencer never reads a clock itself; it only hands durations to the
/// platform's alarm facility, so converting to and from milliseconds is all
/// it needs.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Plain millisecond duration, for hosts and platforms without a native type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u64);

impl TimeDuration for Millis {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        Millis(millis)
    }
}
