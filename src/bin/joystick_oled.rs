//! STM32F103 Blue Pill Joystick Cursor with OLED Display and PWM LEDs
//! =============================================================================================
//!
//! Date			Author          Notes
//! 16/10/2026	    YHY             Initial release
//!
//!==============================================================================================
//!
//! This firmware:
//! - samples a 2-axis analog joystick on ADC1
//! - draws a cursor glyph that follows the stick on an SSD1306 OLED (128x64) via I2C1
//! - sets the brightness of a red (X axis) and a blue (Y axis) LED from stick deflection
//! - toggles a green LED and the display polarity with the joystick button
//! - toggles the PWM LEDs on/off with a second button
//!
//! Hardware Connections:
//!   OLED Display -> Blue Pill
//!      GND  -> GND
//!      VCC  -> 5V
//!      SDA  -> PB7 (I2C1)
//!      SCL  -> PB6 (I2C1)
//!
//!   Joystick:
//!      VRy  -> PA0 (ADC1 IN0)
//!      VRx  -> PA1 (ADC1 IN1)
//!      SW   -> PB12 (pull-up, EXTI12)
//!
//!   Second button -> PB13 (pull-up, EXTI13)
//!
//!   LEDs (anode to pin through resistor):
//!      Red   -> PA6 (TIM3_CH1)
//!      Blue  -> PA2 (TIM2_CH3)
//!      Green -> PB0

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_stm32::{
    adc::Adc,
    exti::ExtiInput,
    gpio::{Level, Output, OutputType, Pull, Speed},
    i2c,
    time::Hertz,
    timer::{
        Channel,
        simple_pwm::{PwmPin, SimplePwm},
    },
};
use ssd1306::{I2CDisplayInterface, Ssd1306, prelude::*};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

#[cfg(feature = "async")]
use embassy_stm32::{bind_interrupts, peripherals};

use joystick_oled::{
    actuation::{Actuator, PwmLevels},
    buttons::ButtonHandler,
    config::BoardConfig,
    debounce::Debouncer,
    error::StartupError,
    hardware::{gpio_led::GpioLed, pwm_led::TimerPwmLed, uptime::Uptime},
    joystick::JoystickSample,
    render::Renderer,
    toggles::{ToggleSnapshot, ToggleState},
};

#[cfg(feature = "async")]
bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

static CONFIG: BoardConfig = BoardConfig::BLUE_PILL;

// Shared between the button task (writer) and the main loop (reader)
static TOGGLES: StaticCell<ToggleState> = StaticCell::new();
static DEBOUNCER: StaticCell<Debouncer> = StaticCell::new();

/// 8MHz HSE through the PLL to 72MHz, APB1 at 36MHz
fn clock_config() -> embassy_stm32::Config {
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Oscillator,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV1,
            mul: PllMul::MUL9,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV2;
        config.rcc.apb2_pre = APBPrescaler::DIV1;
    }
    config
}

fn fatal(e: StartupError) -> ! {
    defmt::panic!("startup failed: {}", e)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let cfg = &CONFIG;
    cfg.validate().map_err(StartupError::from).unwrap_or_else(|e| fatal(e));

    let p = embassy_stm32::init(clock_config());
    info!("joystick_oled starting: {}", cfg);

    let toggles: &'static ToggleState = TOGGLES.init(ToggleState::new(cfg.initial));
    let debouncer: &'static Debouncer = DEBOUNCER.init(Debouncer::new(cfg.debounce_ms, cfg.debounce_policy));

    // Buttons are active low
    let main_button = ExtiInput::new(p.PB12, p.EXTI12, Pull::Up);
    let alt_button = ExtiInput::new(p.PB13, p.EXTI13, Pull::Up);
    let green_led = GpioLed::new(Output::new(p.PB0, Level::Low, Speed::Low));

    // Joystick axes
    let mut adc = Adc::new(p.ADC1);
    let mut joy_y = p.PA0;
    let mut joy_x = p.PA1;

    // Display
    #[cfg(feature = "async")]
    let i2c = i2c::I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH6,
        p.DMA1_CH7,
        Hertz(cfg.display.i2c_frequency_hz),
        Default::default(),
    );

    #[cfg(not(feature = "async"))]
    let i2c = i2c::I2c::new_blocking(
        p.I2C1,
        p.PB6,
        p.PB7,
        Hertz(cfg.display.i2c_frequency_hz),
        Default::default(),
    );

    let interface = I2CDisplayInterface::new_custom_address(i2c, cfg.display.i2c_address);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let renderer = Renderer::new(&cfg.cursor);

    display.init().map_err(|_| StartupError::Display).unwrap_or_else(|e| fatal(e));
    renderer
        .draw_splash(&mut display)
        .and_then(|_| display.flush())
        .map_err(|_| StartupError::Display)
        .unwrap_or_else(|e| fatal(e));

    // One timer per LED
    let red_pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PA6, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz(cfg.pwm.frequency_hz),
        Default::default(),
    );
    let blue_pwm = SimplePwm::new(
        p.TIM2,
        None,
        None,
        Some(PwmPin::new_ch3(p.PA2, OutputType::PushPull)),
        None,
        Hertz(cfg.pwm.frequency_hz),
        Default::default(),
    );
    let mut actuator = Actuator::new(
        TimerPwmLed::new(red_pwm, Channel::Ch1),
        TimerPwmLed::new(blue_pwm, Channel::Ch3),
        &cfg.pwm,
    );

    let handler = ButtonHandler::new(debouncer, toggles, green_led);
    spawner
        .spawn(button_task(main_button, alt_button, handler))
        .unwrap_or_else(|_| defmt::panic!("failed to spawn button task"));

    info!("peripherals ready, entering main loop");

    let mut last_flags: Option<ToggleSnapshot> = None;
    loop {
        // Y is sampled first (ADC IN0), then X (ADC IN1)
        let y = adc.read(&mut joy_y).await;
        let x = adc.read(&mut joy_x).await;
        let sample = JoystickSample::new(x, y, cfg.adc_max);

        let flags = toggles.snapshot();
        if last_flags != Some(flags) {
            info!("flags: {}", flags);
            last_flags = Some(flags);
        }

        let cursor = sample.cursor(cfg);
        if renderer.draw_frame(&mut display, cursor, flags.display_inverted).is_err() {
            warn!("frame draw failed");
        }
        if display.flush().is_err() {
            warn!("display flush failed");
        }

        actuator.apply(PwmLevels::from_sample(&sample, cfg), flags.pwm_enabled);

        // let the button task run between iterations
        yield_now().await;
    }
}

/// Button watcher task
///
/// Waits for falling edges on both buttons and applies the debounced toggles
#[embassy_executor::task]
async fn button_task(
    mut main_button: ExtiInput<'static>,
    mut alt_button: ExtiInput<'static>,
    mut handler: ButtonHandler<'static, GpioLed<Output<'static>>>,
) {
    handler.watch(&mut main_button, &mut alt_button, &Uptime).await
}
