//! Joystick samples and their cursor position
//!
//! Readings are clamped to the ADC range before any scaling.

use embedded_graphics::prelude::Point;

use crate::config::{AxisScale, BoardConfig};

/// One raw ADC reading of both axes, `0..=adc_max`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickSample {
    pub x: u16,
    pub y: u16,
}

impl JoystickSample {
    /// Build a sample from raw readings, clamping anything the ADC should
    /// never have produced
    pub fn new(x: u16, y: u16, adc_max: u16) -> Self {
        if x > adc_max || y > adc_max {
            warn!("ADC reading out of range: x={} y={} (max {})", x, y, adc_max);
        }
        Self {
            x: x.min(adc_max),
            y: y.min(adc_max),
        }
    }

    pub fn cursor(&self, cfg: &BoardConfig) -> CursorPosition {
        CursorPosition {
            x: scale_axis(self.x, &cfg.cursor.x, cfg.adc_max),
            y: scale_axis(self.y, &cfg.cursor.y, cfg.adc_max),
        }
    }
}

fn scale_axis(reading: u16, scale: &AxisScale, adc_max: u16) -> i32 {
    let offset = reading as i32 * scale.span / adc_max as i32;
    if scale.inverted {
        scale.origin - offset
    } else {
        scale.origin + offset
    }
}

/// Top-left pixel of the cursor glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorPosition {
    pub x: i32,
    pub y: i32,
}

impl From<CursorPosition> for Point {
    fn from(pos: CursorPosition) -> Self {
        Point::new(pos.x, pos.y)
    }
}
