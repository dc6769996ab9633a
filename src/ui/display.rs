//! SSD1306 OLED display wrapper.

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X7, FONT_6X10};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use keycalc::error::{Error, Result};
use keycalc::ui::{DisplaySurface, Font};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct Oled<I2C> {
    display: Display<I2C>,
}

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    Oled { display }
}

fn text_style(font: Font) -> MonoTextStyle<'static, BinaryColor> {
    let font = match font {
        Font::Small => &FONT_5X7,
        Font::Status => &FONT_6X10,
        Font::Large => &FONT_10X20,
    };
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Switch the panel on or off. The frame buffer is kept.
    pub fn set_enabled(&mut self, on: bool) -> Result<()> {
        self.display.set_display_on(on).map_err(|_| Error::Display)
    }
}

impl<I2C> DisplaySurface for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn draw_text(&mut self, x: i32, y: i32, font: Font, text: &str) {
        let _ = Text::new(text, Point::new(x, y), text_style(font)).draw(&mut self.display);
    }

    fn draw_icon(&mut self, x: i32, y: i32, width: u32, _height: u32, bitmap: &[u8]) {
        let raw = ImageRaw::<BinaryColor>::new(bitmap, width);
        let _ = Image::new(&raw, Point::new(x, y)).draw(&mut self.display);
    }

    fn present(&mut self) -> Result<()> {
        self.display.flush().map_err(|_| Error::Display)
    }
}
