//! Joystick deflection to LED brightness.
//!
//! Each axis maps linearly onto a signed level `wrap - reading * swing / adc_max`,
//! which crosses zero near the stick's rest position. Small magnitudes are
//! forced to zero so an idle stick leaves the LEDs dark; the sign is dropped
//! and the magnitude is clamped to `wrap`.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::{BoardConfig, PwmConfig};
use crate::hardware::traits::PwmLed;
use crate::joystick::JoystickSample;

/// Signed level for one axis reading, before dead zone and clamping
pub fn signed_level(reading: u16, pwm: &PwmConfig, adc_max: u16) -> i32 {
    pwm.wrap as i32 - reading as i32 * pwm.swing / adc_max as i32
}

/// Duty level applied to the LED for one axis reading
pub fn duty_level(reading: u16, pwm: &PwmConfig, adc_max: u16) -> u16 {
    let level = signed_level(reading, pwm, adc_max);
    if level.abs() < pwm.dead_zone {
        return 0;
    }
    level.unsigned_abs().min(pwm.wrap as u32) as u16
}

/// Levels for both LEDs from one sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmLevels {
    /// Driven by the X axis
    pub red: u16,
    /// Driven by the Y axis
    pub blue: u16,
}

impl PwmLevels {
    pub fn from_sample(sample: &JoystickSample, cfg: &BoardConfig) -> Self {
        Self {
            red: duty_level(sample.x, &cfg.pwm, cfg.adc_max),
            blue: duty_level(sample.y, &cfg.pwm, cfg.adc_max),
        }
    }
}

/// The two PWM LEDs, each on its own timer
pub struct Actuator<R, B> {
    red: R,
    blue: B,
    top: u16,
}

impl<R: PwmLed, B: PwmLed> Actuator<R, B> {
    pub fn new(red: R, blue: B, pwm: &PwmConfig) -> Self {
        Self { red, blue, top: pwm.wrap }
    }

    /// Gate both outputs on `enabled` and write the levels.
    ///
    /// A failed duty write is logged and skipped; the next iteration writes again.
    pub fn apply(&mut self, levels: PwmLevels, enabled: bool) {
        self.red.set_enabled(enabled);
        self.blue.set_enabled(enabled);
        if self.red.set_duty_cycle_fraction(levels.red.min(self.top), self.top).is_err() {
            warn!("red LED duty write failed (level {})", levels.red);
        }
        if self.blue.set_duty_cycle_fraction(levels.blue.min(self.top), self.top).is_err() {
            warn!("blue LED duty write failed (level {})", levels.blue);
        }
    }
}
