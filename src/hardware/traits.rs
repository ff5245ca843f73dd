use embedded_hal::pwm::SetDutyCycle;

/// Discrete on/off LED
pub trait Led {
    fn on(&mut self);
    fn off(&mut self);

    fn set(&mut self, on: bool) {
        if on { self.on() } else { self.off() }
    }
}

/// LED driven by one PWM output.
///
/// Brightness goes through [`SetDutyCycle`]; this only adds output gating,
/// which `embedded-hal` has no trait for.
pub trait PwmLed: SetDutyCycle {
    /// Start or stop the output; a stopped output stays low
    fn set_enabled(&mut self, enabled: bool);
}

/// Millisecond uptime source
pub trait Clock {
    fn now_ms(&self) -> u32;
}
