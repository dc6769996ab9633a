//! Persisted device settings and the boot notice they select.
//!
//! Two map items live in flash: the onboarding flag and the firmware
//! version that last booted. Encoding and decoding are pure so they run
//! in host tests; the flash I/O is in the firmware's storage module.

use crate::config::FIRMWARE_VERSION;
use crate::error::{Error, Result};

/// Map key of the onboarding flag item.
pub const KEY_ONBOARDED: u8 = 0x01;
/// Map key of the firmware version item.
pub const KEY_VERSION: u8 = 0x02;

/// Longest version string kept in flash.
pub const VERSION_CAPACITY: usize = 16;

pub type Version = heapless::String<VERSION_CAPACITY>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub onboarded: bool,
    pub version: Version,
}

/// Notice shown once at power-on before the calculator starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootScreen {
    /// First boot ever.
    Welcome,
    /// A different firmware version ran last.
    Updated,
    None,
}

impl Settings {
    /// Settings as they should be written after this boot.
    pub fn current() -> Self {
        let mut version = Version::new();
        // FIRMWARE_VERSION is short; a longer one would be truncated.
        for c in FIRMWARE_VERSION.chars() {
            if version.push(c).is_err() {
                break;
            }
        }
        Self {
            onboarded: true,
            version,
        }
    }

    /// Which notice to show given what flash held at boot.
    pub fn boot_screen(&self) -> BootScreen {
        if !self.onboarded {
            BootScreen::Welcome
        } else if self.version.as_str() != FIRMWARE_VERSION {
            BootScreen::Updated
        } else {
            BootScreen::None
        }
    }

    /// True when flash must be rewritten after boot.
    pub fn needs_update(&self) -> bool {
        *self != Self::current()
    }
}

pub fn encode_onboarded(onboarded: bool) -> [u8; 1] {
    [onboarded as u8]
}

pub fn decode_onboarded(data: &[u8]) -> Result<bool> {
    match data {
        [0] => Ok(false),
        [1] => Ok(true),
        _ => Err(Error::SettingsCorrupt),
    }
}

pub fn decode_version(data: &[u8]) -> Result<Version> {
    let text = core::str::from_utf8(data).map_err(|_| Error::SettingsCorrupt)?;
    let mut version = Version::new();
    version
        .push_str(text)
        .map_err(|_| Error::BufferOverflow)?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(onboarded: bool, version: &str) -> Settings {
        Settings {
            onboarded,
            version: decode_version(version.as_bytes()).unwrap(),
        }
    }

    #[test]
    fn blank_flash_shows_welcome() {
        assert_eq!(Settings::default().boot_screen(), BootScreen::Welcome);
        assert!(Settings::default().needs_update());
    }

    #[test]
    fn older_version_shows_update_notice() {
        let settings = stored(true, "0.1.0");
        assert_eq!(settings.boot_screen(), BootScreen::Updated);
        assert!(settings.needs_update());
    }

    #[test]
    fn matching_version_boots_straight_in() {
        let settings = Settings::current();
        assert_eq!(settings.boot_screen(), BootScreen::None);
        assert!(!settings.needs_update());
        assert_eq!(settings.version.as_str(), FIRMWARE_VERSION);
    }

    #[test]
    fn onboarded_flag_decoding() {
        assert_eq!(decode_onboarded(&encode_onboarded(true)), Ok(true));
        assert_eq!(decode_onboarded(&encode_onboarded(false)), Ok(false));
        assert_eq!(decode_onboarded(&[7]), Err(Error::SettingsCorrupt));
        assert_eq!(decode_onboarded(&[]), Err(Error::SettingsCorrupt));
    }

    #[test]
    fn version_decoding_rejects_bad_data() {
        assert_eq!(decode_version(b"1.2.3").unwrap().as_str(), "1.2.3");
        assert_eq!(decode_version(&[0xFF, 0xFE]), Err(Error::SettingsCorrupt));
        assert_eq!(
            decode_version(b"0123456789abcdefXYZ"),
            Err(Error::BufferOverflow)
        );
    }
}
