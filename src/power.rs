//! Power management - the one-way transition to System OFF.
//!
//! nRF52840 power modes:
//! - System ON: normal operation, matrix scanned every tick
//! - System OFF: deep sleep (~0.3 µA), only a GPIO DETECT wakes it
//!
//! Waking from System OFF is a reset, so the firmware boots afresh.

use defmt::{info, warn};
use embassy_nrf::pac;
use embassy_nrf::pac::gpio::vals;
use embassy_time::Timer;
use keycalc::config::SLEEP_SCREEN_MS;
use keycalc::ui::presenter;

use crate::display::Oled;

/// Show the sleep screen, switch the panel off, arm `wake_pin` (port 0,
/// active low) as the wake source and enter System OFF. Never returns.
pub async fn enter_low_power<I2C>(oled: &mut Oled<I2C>, wake_pin: u8) -> !
where
    I2C: embedded_hal::i2c::I2c,
{
    info!("Power: entering System OFF, wake on P0.{}", wake_pin);

    if let Err(e) = presenter::draw_sleeping(oled) {
        warn!("sleep screen failed: {}", e);
    }
    Timer::after_millis(SLEEP_SCREEN_MS).await;
    if let Err(e) = oled.set_enabled(false) {
        warn!("display off failed: {}", e);
    }

    pac::P0.pin_cnf(wake_pin as usize).write(|w| {
        w.set_dir(vals::Dir::INPUT);
        w.set_input(vals::Input::CONNECT);
        w.set_pull(vals::Pull::PULLUP);
        w.set_sense(vals::Sense::LOW);
    });

    pac::POWER.systemoff().write(|w| w.set_systemoff(true));

    // System OFF is emulated under a debugger; park here.
    loop {
        cortex_m::asm::wfe();
    }
}
