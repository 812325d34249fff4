//! Reentrancy lock shared between the button interrupt and the alarm chain.

use core::sync::atomic::{AtomicBool, Ordering};

/// Process-wide "a light sequence is in flight" flag.
///
/// Set by the button handler when a press is accepted and cleared by the last
/// link of the alarm chain. Plain loads and stores are atomic on every target;
/// the test-and-set in [`try_activate`](Self::try_activate) runs inside a
/// critical section because thumbv6m has no compare-and-swap.
#[derive(Debug, Default)]
pub struct SequenceGuard {
    active: AtomicBool,
}

impl SequenceGuard {
    /// Creates an idle guard. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    /// Returns true while a sequence is running.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Marks the guard active.
    ///
    /// Returns `true` only if it was idle before; an already active guard is
    /// left untouched and `false` is returned.
    pub fn try_activate(&self) -> bool {
        critical_section::with(|_| {
            if self.active.load(Ordering::Acquire) {
                false
            } else {
                self.active.store(true, Ordering::Release);
                true
            }
        })
    }

    /// Marks the guard idle, whatever its previous state.
    #[inline]
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_guard_is_idle() {
        let guard = SequenceGuard::new();
        assert!(!guard.is_active());
    }

    #[test]
    fn try_activate_succeeds_once() {
        let guard = SequenceGuard::new();
        assert!(guard.try_activate());
        assert!(guard.is_active());
        assert!(!guard.try_activate());
        assert!(guard.is_active());
    }

    #[test]
    fn deactivate_is_unconditional() {
        let guard = SequenceGuard::new();
        guard.deactivate();
        assert!(!guard.is_active());

        guard.try_activate();
        guard.deactivate();
        assert!(!guard.is_active());
        assert!(guard.try_activate());
    }

    #[test]
    fn works_as_static() {
        static GUARD: SequenceGuard = SequenceGuard::new();
        assert!(GUARD.try_activate());
        GUARD.deactivate();
        assert!(!GUARD.is_active());
    }

    #[test]
    fn only_one_thread_wins_activation() {
        extern crate std;
        use std::sync::Arc;
        use std::vec::Vec;

        let guard = Arc::new(SequenceGuard::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = Arc::clone(&guard);
                std::thread::spawn(move || guard.try_activate())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
