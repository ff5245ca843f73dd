//! Shared toggle flags
//!
//! The button watcher flips these, the main loop reads a snapshot once per
//! iteration.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::InitialToggles;

/// Lock-free flag bank written by the button watcher and read by the main loop.
///
/// Every flag is a single-word atomic, so neither side can stall the other. A
/// read racing a toggle sees either value and is corrected on the next loop
/// iteration.
pub struct ToggleState {
    green_led_on: AtomicBool,
    pwm_enabled: AtomicBool,
    display_inverted: AtomicBool,
}

/// Copy of all flags taken once per loop iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToggleSnapshot {
    pub green_led_on: bool,
    pub pwm_enabled: bool,
    pub display_inverted: bool,
}

impl ToggleState {
    pub const fn new(initial: InitialToggles) -> Self {
        Self {
            green_led_on: AtomicBool::new(initial.green_led_on),
            pwm_enabled: AtomicBool::new(initial.pwm_enabled),
            display_inverted: AtomicBool::new(initial.display_inverted),
        }
    }

    pub fn green_led_on(&self) -> bool {
        self.green_led_on.load(Ordering::Relaxed)
    }

    pub fn pwm_enabled(&self) -> bool {
        self.pwm_enabled.load(Ordering::Relaxed)
    }

    pub fn display_inverted(&self) -> bool {
        self.display_inverted.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> ToggleSnapshot {
        ToggleSnapshot {
            green_led_on: self.green_led_on(),
            pwm_enabled: self.pwm_enabled(),
            display_inverted: self.display_inverted(),
        }
    }

    /// Invert the green LED flag, returns the new value
    pub fn toggle_green_led(&self) -> bool {
        !self.green_led_on.fetch_xor(true, Ordering::Relaxed)
    }

    /// Invert the display polarity flag, returns the new value
    pub fn toggle_display_inverted(&self) -> bool {
        !self.display_inverted.fetch_xor(true, Ordering::Relaxed)
    }

    /// Invert the PWM enable flag, returns the new value
    pub fn toggle_pwm_enabled(&self) -> bool {
        !self.pwm_enabled.fetch_xor(true, Ordering::Relaxed)
    }
}
