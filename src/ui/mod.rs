//! User interface subsystem - layout and drawing for the 128×64 OLED.
//!
//! The presenter computes every coordinate and font choice itself and
//! issues primitive draw calls against a [`DisplaySurface`]. The
//! firmware implements the surface on the SSD1306 driver; tests record
//! the calls instead.
//!
//! ## Components
//!
//! - **Presenter**: calculator, menu, sleep and boot screens
//! - **Icons**: 8×8 status-bar bitmaps
//! - **Input logic**: list cursor and scroll-window helpers

pub mod icons;
pub mod input_logic;
pub mod presenter;

use crate::error::Result;

/// Fonts available on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// 5×7, menu entries.
    Small,
    /// 6×10, status bars and titles.
    Status,
    /// 10×20, the main value.
    Large,
}

impl Font {
    /// Horizontal advance per character in pixels.
    pub const fn advance(&self) -> i32 {
        match self {
            Font::Small => 5,
            Font::Status => 6,
            Font::Large => 10,
        }
    }

    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.advance()
    }
}

/// Drawing sink. Coordinates are in pixels; text `y` is the baseline.
pub trait DisplaySurface {
    fn clear(&mut self);
    fn draw_text(&mut self, x: i32, y: i32, font: Font, text: &str);
    /// Draw a 1-bit bitmap, rows packed MSB first and padded to whole bytes.
    fn draw_icon(&mut self, x: i32, y: i32, width: u32, height: u32, bitmap: &[u8]);
    /// Push the frame to the panel.
    fn present(&mut self) -> Result<()>;
}

/// Hardware status shown in the bottom bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags {
    pub usb_connected: bool,
    pub low_battery: bool,
}
