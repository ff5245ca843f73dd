//! Peripheral wrappers behind the traits the rest of the crate talks to.

pub mod gpio_led;
#[cfg(feature = "firmware")]
pub mod pwm_led;
#[cfg(feature = "firmware")]
pub mod uptime;
pub mod traits;
