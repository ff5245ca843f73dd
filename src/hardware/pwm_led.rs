use super::traits::PwmLed;
use core::convert::Infallible;
use embassy_stm32::timer::{
    Channel, GeneralInstance4Channel,
    simple_pwm::SimplePwm,
};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};

/// One channel of an STM32 timer driving an LED.
///
/// Each LED gets its own timer, so enabling/disabling one never touches the
/// other's clock.
pub struct TimerPwmLed<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
    channel: Channel,
}

impl<'d, T: GeneralInstance4Channel> TimerPwmLed<'d, T> {
    pub fn new(pwm: SimplePwm<'d, T>, channel: Channel) -> Self {
        let mut led = Self { pwm, channel };
        led.pwm.channel(channel).set_duty_cycle_fully_off();
        led.pwm.channel(channel).enable();
        led
    }
}

impl<'d, T: GeneralInstance4Channel> ErrorType for TimerPwmLed<'d, T> {
    type Error = Infallible;
}

impl<'d, T: GeneralInstance4Channel> SetDutyCycle for TimerPwmLed<'d, T> {
    fn max_duty_cycle(&self) -> u16 {
        self.pwm.max_duty_cycle()
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.pwm.channel(self.channel).set_duty_cycle(duty);
        Ok(())
    }
}

impl<'d, T: GeneralInstance4Channel> PwmLed for TimerPwmLed<'d, T> {
    fn set_enabled(&mut self, enabled: bool) {
        let mut ch = self.pwm.channel(self.channel);
        if enabled {
            ch.enable();
        } else {
            ch.disable();
        }
    }
}
