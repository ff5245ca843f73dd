use super::traits::Led;
use embedded_hal::digital::OutputPin;

pub struct GpioLed<P> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> GpioLed<P> {
    /// LED lit when the pin is high
    pub fn new(pin: P) -> Self {
        Self { pin, active_low: false }
    }

    /// LED lit when the pin is low (e.g. the Blue Pill's PC13)
    pub fn new_active_low(pin: P) -> Self {
        Self { pin, active_low: true }
    }

    fn drive(&mut self, high: bool) {
        let res = if high { self.pin.set_high() } else { self.pin.set_low() };
        if res.is_err() {
            warn!("LED pin write failed");
        }
    }
}

impl<P: OutputPin> Led for GpioLed<P> {
    fn on(&mut self) {
        self.drive(!self.active_low);
    }

    fn off(&mut self) {
        self.drive(self.active_low);
    }
}
