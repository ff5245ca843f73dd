//! Time-window debounce shared between the button watcher and anything else
//! that wants to know when the last edge was accepted.
//!
//! Timestamps are wrapping `u32` milliseconds since boot, so the clock fits a
//! single-word atomic on Cortex-M3 and a wrap after ~49 days does not matter.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::buttons::Button;

/// Which edges share a debounce clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebouncePolicy {
    /// One clock for both buttons: a press on one suppresses the other
    /// for the rest of the window
    Shared,
    /// Each button has its own clock
    PerButton,
}

/// Last accepted edge time per clock slot.
///
/// With [`DebouncePolicy::Shared`] only the first slot is used.
pub struct Debouncer {
    window_ms: u32,
    policy: DebouncePolicy,
    last_accepted: [AtomicU32; 2],
}

impl Debouncer {
    pub const fn new(window_ms: u32, policy: DebouncePolicy) -> Self {
        Self {
            window_ms,
            policy,
            last_accepted: [AtomicU32::new(0), AtomicU32::new(0)],
        }
    }

    pub fn policy(&self) -> DebouncePolicy {
        self.policy
    }

    fn slot(&self, button: Button) -> &AtomicU32 {
        match self.policy {
            DebouncePolicy::Shared => &self.last_accepted[0],
            DebouncePolicy::PerButton => &self.last_accepted[button.index()],
        }
    }

    /// Accept an edge seen at `now_ms` if the window since the last accepted
    /// edge has elapsed. Rejected edges leave the clock untouched.
    pub fn try_accept(&self, button: Button, now_ms: u32) -> bool {
        let slot = self.slot(button);
        let window = self.window_ms;
        slot.fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
            (now_ms.wrapping_sub(last) >= window).then_some(now_ms)
        })
        .is_ok()
    }

    /// Timestamp of the last edge accepted for `button`
    pub fn last_accepted(&self, button: Button) -> u32 {
        self.slot(button).load(Ordering::Acquire)
    }
}
