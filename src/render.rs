//! Frame drawing for the 128x64 monochrome panel.
//!
//! Frames are drawn into any `DrawTarget<Color = BinaryColor>`; the caller
//! flushes the SSD1306 buffer afterwards.

use embedded_graphics::{
    mono_font::{MonoTextStyle, MonoTextStyleBuilder, ascii::FONT_5X8},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Baseline, Text},
};

use crate::config::CursorConfig;
use crate::joystick::CursorPosition;

pub struct Renderer {
    glyph: &'static str,
    border: Rectangle,
    splash_position: Point,
    glyph_style: MonoTextStyle<'static, BinaryColor>,
}

impl Renderer {
    pub fn new(cfg: &CursorConfig) -> Self {
        let (x, y) = cfg.border_origin;
        let (w, h) = cfg.border_size;
        let (sx, sy) = cfg.splash_position;
        Self {
            glyph: cfg.glyph,
            border: Rectangle::new(Point::new(x, y), Size::new(w, h)),
            splash_position: Point::new(sx, sy),
            // the glyph cell is cleared so the cursor stays readable on both polarities
            glyph_style: MonoTextStyleBuilder::new()
                .font(&FONT_5X8)
                .text_color(BinaryColor::On)
                .background_color(BinaryColor::Off)
                .build(),
        }
    }

    fn border_style(inverted: bool) -> PrimitiveStyle<BinaryColor> {
        let color = BinaryColor::from(inverted);
        let builder = PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside);
        if inverted {
            builder.build()
        } else {
            builder.fill_color(color).build()
        }
    }

    fn draw_glyph<D>(&self, target: &mut D, at: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        Text::with_baseline(self.glyph, at, self.glyph_style, Baseline::Top).draw(target)?;
        Ok(())
    }

    /// Draw one loop frame.
    ///
    /// With `inverted` set the background is dark and only the border is lit;
    /// otherwise the margin outside the border is lit and the inside is dark.
    pub fn draw_frame<D>(&self, target: &mut D, cursor: CursorPosition, inverted: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        target.clear(BinaryColor::from(!inverted))?;
        self.border.into_styled(Self::border_style(inverted)).draw(target)?;
        self.draw_glyph(target, cursor.into())
    }

    /// Blank frame with the glyph at its startup position
    pub fn draw_splash<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        target.clear(BinaryColor::Off)?;
        self.draw_glyph(target, self.splash_position)
    }
}
