//! USB HID keyboard device and the keystroke queue feeding it.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one boot-protocol keyboard endpoint.

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use keycalc::config::{self, HID_TAP_MS, KEYSTROKE_QUEUE_DEPTH};
use keycalc::error::Error;
use keycalc::hid::keyboard::KEYBOARD_REPORT_SIZE;
use keycalc::hid::{Keystroke, KeystrokeSink};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_STATE_HANDLER: StaticCell<UsbStateHandler> = StaticCell::new();

static USB_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Keystrokes waiting for the writer task.
static KEYSTROKES: Channel<CriticalSectionRawMutex, Keystroke, KEYSTROKE_QUEUE_DEPTH> =
    Channel::new();

struct UsbStateHandler;

impl embassy_usb::Handler for UsbStateHandler {
    fn configured(&mut self, configured: bool) {
        USB_CONFIGURED.store(configured, Ordering::Relaxed);
        info!("USB configured={}", configured);
    }

    fn suspended(&mut self, suspended: bool) {
        if suspended {
            USB_CONFIGURED.store(false, Ordering::Relaxed);
        }
        info!("USB suspended={}", suspended);
    }
}

/// True while a host has the device configured.
pub fn usb_connected() -> bool {
    USB_CONFIGURED.load(Ordering::Relaxed)
}

/// Build result containing the USB device runner and the keyboard writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: HidWriter<'static, UsbDriver, KEYBOARD_REPORT_SIZE>,
}

/// Initialise the USB stack and create the HID keyboard.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    builder.handler(USB_STATE_HANDLER.init(UsbStateHandler));

    let kb_state = KB_STATE.init(State::new());
    let kb_config = HidConfig {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard_writer = HidWriter::new(&mut builder, kb_state, kb_config);

    let device = builder.build();

    info!("USB HID keyboard initialised");

    UsbHidDevice {
        device,
        keyboard_writer,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Keystroke writer - taps each queued keystroke as a press report, a
/// short hold, then a release report.
pub async fn hid_writer_task(
    mut keyboard: HidWriter<'static, UsbDriver, KEYBOARD_REPORT_SIZE>,
) -> ! {
    info!("HID writer task started - waiting for keystrokes");

    let mut buf = [0u8; KEYBOARD_REPORT_SIZE];

    loop {
        let stroke = KEYSTROKES.receive().await;

        let n = stroke.press_report().serialize(&mut buf);
        if keyboard.write(&buf[..n]).await.is_err() {
            warn!("USB keyboard write failed: {}", Error::Usb);
            continue;
        }
        Timer::after_millis(HID_TAP_MS).await;

        let n = stroke.release_report().serialize(&mut buf);
        if keyboard.write(&buf[..n]).await.is_err() {
            warn!("USB keyboard release failed: {}", Error::Usb);
        }
    }
}

/// Keystroke sink used by the scan loop. Never blocks: strokes are
/// dropped when no host is attached or the queue is full.
pub struct QueueSink;

impl QueueSink {
    fn enqueue(&mut self, stroke: Keystroke) {
        if !usb_connected() {
            return;
        }
        if KEYSTROKES.try_send(stroke).is_err() {
            warn!("keystroke dropped: {}", Error::QueueFull);
        }
    }
}

impl KeystrokeSink for QueueSink {
    fn send_character(&mut self, c: char) {
        if let Some(stroke) = Keystroke::from_char(c) {
            self.enqueue(stroke);
        }
    }

    fn send_raw_keycode(&mut self, code: u8) {
        self.enqueue(Keystroke::raw(code));
    }
}
