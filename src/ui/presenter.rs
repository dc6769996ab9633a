//! Screen layouts.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ 12 +            (top bar)    │  y = 10, status font
//! │                              │
//! │                   12345.67   │  y = 42, large font, right-aligned
//! │                              │
//! │ TAX+          [usb][#][bat]  │  text y = 63, icons y = 55
//! └──────────────────────────────┘
//! ```

use core::fmt::Write;

use crate::config::{FIRMWARE_VERSION, SCREEN_WIDTH};
use crate::controller::Controller;
use crate::error::Result;
use crate::macro_engine::MacroState;
use crate::menu::MenuContext;
use crate::settings::BootScreen;

use super::icons::{self, ICON_SIZE};
use super::{DisplaySurface, Font, StatusFlags};

pub const TOP_BAR_Y: i32 = 10;
pub const VALUE_Y: i32 = 42;
pub const VALUE_MARGIN: i32 = 2;
pub const BOTTOM_TEXT_Y: i32 = 63;
pub const ICON_Y: i32 = 55;
pub const ICON_GAP: i32 = 2;
pub const MENU_FIRST_ROW_Y: i32 = 26;
pub const MENU_ROW_PITCH: i32 = 12;

/// Text shown in place of the value after send-result.
pub const SENT_TEXT: &str = "SENT";

type Line = heapless::String<40>;

/// Draw the screen for the current controller state and present it.
pub fn render<D: DisplaySurface + ?Sized>(
    surface: &mut D,
    ctrl: &Controller,
    status: &StatusFlags,
) -> Result<()> {
    surface.clear();
    if ctrl.menu_open() {
        draw_menu(surface, ctrl.menu());
    } else {
        draw_calculator(surface, ctrl, status);
    }
    surface.present()
}

/// X coordinate that right-aligns `text` against the screen edge.
pub fn right_aligned_x(font: Font, text: &str) -> i32 {
    (SCREEN_WIDTH - font.text_width(text) - VALUE_MARGIN).max(0)
}

/// X coordinate of status icon `slot`, counted from the right edge.
pub fn icon_slot_x(slot: usize) -> i32 {
    SCREEN_WIDTH - (slot as i32 + 1) * (ICON_SIZE as i32 + ICON_GAP)
}

fn draw_calculator<D: DisplaySurface + ?Sized>(
    surface: &mut D,
    ctrl: &Controller,
    status: &StatusFlags,
) {
    let calc = ctrl.calc();

    let mut top = Line::new();
    if ctrl.macro_ctx().state() == MacroState::AwaitingInput {
        let _ = top.push_str(ctrl.macro_ctx().current_prompt());
    } else if let Some(op) = calc.pending_op() {
        let _ = write!(top, "{} {}", calc.stored(), char::from(op.symbol()));
    }
    if !top.is_empty() {
        surface.draw_text(0, TOP_BAR_Y, Font::Status, &top);
    }

    let value = if ctrl.sent_ack_active() {
        SENT_TEXT
    } else {
        calc.display()
    };
    surface.draw_text(right_aligned_x(Font::Large, value), VALUE_Y, Font::Large, value);

    if !calc.function_name().is_empty() {
        surface.draw_text(0, BOTTOM_TEXT_Y, Font::Status, calc.function_name());
    }

    // Fixed slots, right to left.
    let slots = [
        (status.usb_connected, &icons::USB),
        (calc.numpad_mode(), &icons::NUMPAD),
        (status.low_battery, &icons::BATTERY_LOW),
    ];
    for (slot, (shown, bitmap)) in slots.iter().enumerate() {
        if *shown {
            surface.draw_icon(icon_slot_x(slot), ICON_Y, ICON_SIZE, ICON_SIZE, *bitmap);
        }
    }
}

fn draw_menu<D: DisplaySurface + ?Sized>(surface: &mut D, menu: &MenuContext) {
    surface.draw_text(0, TOP_BAR_Y, Font::Status, "MACROS");

    let entries = menu.entries();
    for (row, index) in menu.window().enumerate() {
        let Some(id) = entries.get(index) else {
            continue;
        };
        let marker = if index == menu.selected_index() { '>' } else { ' ' };
        let mut line = Line::new();
        let _ = write!(line, "{} {:<5} {}", marker, id.label(), id.title());
        let y = MENU_FIRST_ROW_Y + row as i32 * MENU_ROW_PITCH;
        surface.draw_text(0, y, Font::Small, &line);
    }
}

/// Shown briefly before the panel is switched off.
pub fn draw_sleeping<D: DisplaySurface + ?Sized>(surface: &mut D) -> Result<()> {
    surface.clear();
    let text = "Sleeping...";
    let x = (SCREEN_WIDTH - Font::Status.text_width(text)) / 2;
    surface.draw_text(x, 36, Font::Status, text);
    surface.present()
}

/// First-run or post-update notice. Draws nothing for [`BootScreen::None`].
pub fn draw_boot_notice<D: DisplaySurface + ?Sized>(
    surface: &mut D,
    screen: BootScreen,
) -> Result<()> {
    let headline = match screen {
        BootScreen::Welcome => "Welcome!",
        BootScreen::Updated => "Updated to",
        BootScreen::None => return Ok(()),
    };
    let mut version = Line::new();
    let _ = write!(version, "keycalc v{}", FIRMWARE_VERSION);

    surface.clear();
    surface.draw_text(0, 20, Font::Status, headline);
    surface.draw_text(0, 36, Font::Status, &version);
    if screen == BootScreen::Welcome {
        surface.draw_text(0, 58, Font::Small, "Hold - and 0 for Fn");
    }
    surface.present()
}
