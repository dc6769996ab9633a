//! Persistent settings in internal flash.
//!
//! Uses the nRF52840's internal flash via the `sequential-storage` map
//! to keep the onboarding flag and the last booted firmware version.
//!
//! Storage layout:
//!   - `KEY_ONBOARDED` → one byte, 0 or 1
//!   - `KEY_VERSION`   → UTF-8 version string
//!   - The flash pages are managed by `sequential-storage`, which
//!     handles wear levelling and GC.

use core::ops::Range;

use defmt::{debug, info, warn};
use embedded_storage_async::nor_flash::NorFlash;
use keycalc::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use keycalc::error::{Error, Result};
use keycalc::settings::{
    decode_onboarded, decode_version, encode_onboarded, Settings, KEY_ONBOARDED, KEY_VERSION,
};
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Scratch buffer for one map item (key + value + header).
const ITEM_BUF_SIZE: usize = 64;

fn flash_range() -> Range<u32> {
    STORAGE_START..STORAGE_END
}

async fn fetch<F: NorFlash>(
    flash: &mut F,
    buf: &mut [u8; ITEM_BUF_SIZE],
    key: u8,
) -> Result<Option<heapless::Vec<u8, ITEM_BUF_SIZE>>> {
    let item = fetch_item::<u8, &[u8], _>(flash, flash_range(), &mut NoCache::new(), buf, &key)
        .await
        .map_err(|e| {
            warn!("Flash read error: {:?}", defmt::Debug2Format(&e));
            Error::Storage
        })?;
    match item {
        Some(data) => heapless::Vec::from_slice(data)
            .map(Some)
            .map_err(|_| Error::BufferOverflow),
        None => Ok(None),
    }
}

async fn store<F: NorFlash>(flash: &mut F, key: u8, value: &[u8]) -> Result<()> {
    let mut buf = [0u8; ITEM_BUF_SIZE];
    store_item::<u8, &[u8], _>(
        flash,
        flash_range(),
        &mut NoCache::new(),
        &mut buf,
        &key,
        &value,
    )
    .await
    .map_err(|e| {
        warn!("Flash write error: {:?}", defmt::Debug2Format(&e));
        Error::Storage
    })
}

/// Read settings. Missing items read as a fresh device.
pub async fn load<F: NorFlash>(flash: &mut F) -> Result<Settings> {
    let mut buf = [0u8; ITEM_BUF_SIZE];
    let mut settings = Settings::default();

    if let Some(data) = fetch(flash, &mut buf, KEY_ONBOARDED).await? {
        settings.onboarded = decode_onboarded(&data)?;
    }
    if let Some(data) = fetch(flash, &mut buf, KEY_VERSION).await? {
        settings.version = decode_version(&data)?;
    }

    info!(
        "Settings loaded: onboarded={} version={}",
        settings.onboarded,
        settings.version.as_str()
    );
    Ok(settings)
}

/// Persist settings. Both items are rewritten.
pub async fn save<F: NorFlash>(flash: &mut F, settings: &Settings) -> Result<()> {
    store(flash, KEY_ONBOARDED, &encode_onboarded(settings.onboarded)).await?;
    store(flash, KEY_VERSION, settings.version.as_bytes()).await?;
    debug!("Settings saved");
    Ok(())
}
