//! Board configuration
//!
//! Every numeric constant the firmware depends on lives in [`BoardConfig`]. The
//! binary picks one instance at startup (currently [`BoardConfig::BLUE_PILL`]),
//! validates it and hands references to the components that need it. Pin
//! assignment itself is typed by the HAL and lives in the binary's board setup.

use crate::debounce::DebouncePolicy;

/// Display geometry of the SSD1306 panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub i2c_address: u8,
    /// I2C bus frequency in Hz
    pub i2c_frequency_hz: u32,
    pub width: u32,
    pub height: u32,
}

/// Linear mapping of one joystick axis onto display pixels.
///
/// `pixel = origin + sign * reading * span / adc_max`, in integer arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisScale {
    pub origin: i32,
    pub span: i32,
    /// Y grows downwards on the display while the joystick Y grows upwards
    pub inverted: bool,
}

impl AxisScale {
    /// Smallest and largest pixel coordinate this axis can produce
    pub const fn bounds(&self) -> (i32, i32) {
        if self.inverted {
            (self.origin - self.span, self.origin)
        } else {
            (self.origin, self.origin + self.span)
        }
    }
}

/// Cursor placement and frame decoration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorConfig {
    pub x: AxisScale,
    pub y: AxisScale,
    /// Border rectangle: top-left corner
    pub border_origin: (i32, i32),
    /// Border rectangle: width and height
    pub border_size: (u32, u32),
    pub glyph: &'static str,
    /// Where the glyph is drawn on the startup frame
    pub splash_position: (i32, i32),
}

/// PWM output and joystick-to-duty mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    /// Highest duty level, levels are applied as `level / wrap`
    pub wrap: u16,
    /// Timer output frequency
    pub frequency_hz: u32,
    /// Level swing across the full ADC range: `level = wrap - reading * swing / adc_max`
    pub swing: i32,
    /// Levels with magnitude below this are forced to zero
    pub dead_zone: i32,
}

/// Initial values of the shared toggle flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitialToggles {
    pub green_led_on: bool,
    pub pwm_enabled: bool,
    pub display_inverted: bool,
}

/// All constants of one board revision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Largest value the ADC returns (12-bit)
    pub adc_max: u16,
    pub display: DisplayConfig,
    pub cursor: CursorConfig,
    pub pwm: PwmConfig,
    /// Minimum time between two accepted button edges
    pub debounce_ms: u32,
    pub debounce_policy: DebouncePolicy,
    pub initial: InitialToggles,
}

impl BoardConfig {
    /// STM32F103C8 board with a 128x64 SSD1306 at 0x3C
    pub const BLUE_PILL: BoardConfig = BoardConfig {
        adc_max: 4095,
        display: DisplayConfig {
            i2c_address: 0x3C,
            i2c_frequency_hz: 400_000,
            width: 128,
            height: 64,
        },
        cursor: CursorConfig {
            x: AxisScale { origin: 4, span: 112, inverted: false },
            y: AxisScale { origin: 52, span: 48, inverted: true },
            border_origin: (3, 3),
            border_size: (122, 58),
            glyph: "*",
            splash_position: (28, 60),
        },
        pwm: PwmConfig {
            wrap: 24_999,
            frequency_hz: 50,
            swing: 50_000,
            dead_zone: 1_000,
        },
        debounce_ms: 200,
        debounce_policy: DebouncePolicy::Shared,
        initial: InitialToggles {
            green_led_on: false,
            pwm_enabled: true,
            display_inverted: true,
        },
    };

    /// Check that the constants describe something the firmware can drive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adc_max == 0 {
            return Err(ConfigError::AdcRange);
        }
        if self.pwm.wrap == 0 || self.pwm.frequency_hz == 0 {
            return Err(ConfigError::PwmTiming);
        }
        // reading * swing and reading * span are computed in i32
        let max_factor = i32::MAX / self.adc_max as i32;
        if self.pwm.dead_zone < 0 || self.pwm.swing <= 0 || self.pwm.swing > max_factor {
            return Err(ConfigError::PwmMapping);
        }
        if self.display.i2c_address > 0x7F || self.display.i2c_frequency_hz == 0 {
            return Err(ConfigError::DisplayBus);
        }

        let span_ok = |scale: &AxisScale| (0..=max_factor).contains(&scale.span);
        if !span_ok(&self.cursor.x) || !span_ok(&self.cursor.y) {
            return Err(ConfigError::CursorOutOfDisplay);
        }
        let (w, h) = (self.display.width as i32, self.display.height as i32);
        let fits = |(lo, hi): (i32, i32), limit: i32| lo >= 0 && hi < limit;
        if !fits(self.cursor.x.bounds(), w) || !fits(self.cursor.y.bounds(), h) {
            return Err(ConfigError::CursorOutOfDisplay);
        }

        let (bx, by) = self.cursor.border_origin;
        let (bw, bh) = self.cursor.border_size;
        if bx < 0 || by < 0 || bx + bw as i32 > w || by + bh as i32 > h {
            return Err(ConfigError::BorderOutOfDisplay);
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::BLUE_PILL
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    AdcRange,
    PwmTiming,
    PwmMapping,
    DisplayBus,
    CursorOutOfDisplay,
    BorderOutOfDisplay,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::AdcRange => "ADC maximum must be non-zero",
            Self::PwmTiming => "PWM wrap and frequency must be non-zero",
            Self::PwmMapping => "PWM swing out of range or negative dead zone",
            Self::DisplayBus => "invalid display I2C address or frequency",
            Self::CursorOutOfDisplay => "cursor range exceeds display",
            Self::BorderOutOfDisplay => "border rectangle exceeds display",
        };
        f.write_str(msg)
    }
}
