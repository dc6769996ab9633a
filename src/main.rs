//! keycalc firmware - nRF52840 keypad calculator.
//!
//! Boot sequence: load settings from flash, show the welcome/update
//! notice if needed, bring up USB, then run the scan loop at a fixed
//! cadence until the idle timeout sends the chip to System OFF.

#![no_std]
#![no_main]

#[path = "ui/display.rs"]
mod display;
mod power;
#[path = "keypad/scan.rs"]
mod scan;
mod storage;
#[path = "usb/mod.rs"]
mod usb;

use defmt::{info, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_time::{Duration, Instant, Ticker, Timer};
use keycalc::config::{BOOT_NOTICE_MS, FIRMWARE_VERSION, SCAN_INTERVAL_MS};
use keycalc::settings::{BootScreen, Settings};
use keycalc::ui::{presenter, StatusFlags};
use keycalc::{App, TickOutcome};
use usb::hid_device::{self, QueueSink, UsbDriver};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::task]
async fn usb_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn hid_task(
    keyboard: embassy_usb::class::hid::HidWriter<
        'static,
        UsbDriver,
        { keycalc::hid::keyboard::KEYBOARD_REPORT_SIZE },
    >,
) -> ! {
    hid_device::hid_writer_task(keyboard).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("keycalc v{} starting", FIRMWARE_VERSION);

    // - Settings -
    let mut flash = BlockingAsync::new(Nvmc::new(p.NVMC));
    let stored = match storage::load(&mut flash).await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Settings unreadable ({}), treating as first boot", e);
            Settings::default()
        }
    };

    // - Display -
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut oled = display::init(i2c);

    let boot = stored.boot_screen();
    if boot != BootScreen::None {
        info!("Boot notice: {}", boot);
        if let Err(e) = presenter::draw_boot_notice(&mut oled, boot) {
            warn!("boot notice failed: {}", e);
        }
        Timer::after_millis(BOOT_NOTICE_MS).await;
    }
    if stored.needs_update() {
        if let Err(e) = storage::save(&mut flash, &Settings::current()).await {
            warn!("Settings not saved: {}", e);
        }
    }

    // - USB -
    let usb = hid_device::init(p.USBD);
    spawner.must_spawn(usb_task(usb.device));
    spawner.must_spawn(hid_task(usb.keyboard_writer));

    // - Key matrix -
    let mut scanner = scan::MatrixScanner::new(
        [
            p.P0_02.degrade(),
            p.P0_03.degrade(),
            p.P0_28.degrade(),
            p.P0_29.degrade(),
        ],
        [
            p.P0_04.degrade(),
            p.P0_05.degrade(),
            p.P0_30.degrade(),
            p.P0_31.degrade(),
        ],
        p.P0_11.degrade(),
        p.P0_24.degrade(),
    );

    let mut sink = QueueSink;
    let mut app = App::new(Instant::now().as_millis());
    let mut ticker = Ticker::every(Duration::from_millis(SCAN_INTERVAL_MS));

    info!("Scan loop running");

    loop {
        app.set_status(StatusFlags {
            usb_connected: hid_device::usb_connected(),
            low_battery: scanner.battery_low(),
        });

        let keys = scanner.scan();
        let wake = scanner.wake_pressed();
        let now = Instant::now().as_millis();

        if app.tick(keys, wake, now, &mut sink, &mut oled) == TickOutcome::Sleep {
            power::enter_low_power(&mut oled, scanner.wake_pin()).await;
        }

        ticker.next().await;
    }
}
