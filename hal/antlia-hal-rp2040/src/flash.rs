//! Flash settings storage for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage in the
//! last 64KB of flash. Each settings slot is stored under its own
//! one-byte key as a little-endian u32.
//!
//! Implements the `SettingsStorage` trait from `antlia-hal`.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use antlia_hal::storage::{SlotKey, StorageError};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB part on the controller board
pub const SETTINGS_PARTITION_SIZE: usize = 64 * 1024;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Flash erase size for RP2040
pub const FLASH_ERASE_SIZE: usize = ERASE_SIZE;

/// Flash range for the settings partition
pub const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

// Slot values are u32, stored little-endian
const SLOT_VALUE_LEN: usize = 4;

/// RP2040 settings storage
///
/// Wear leveling and integrity come from sequential-storage; a torn or
/// garbled entry reads back as an error, not a wrong value.
pub struct Rp2040SettingsFlash<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040SettingsFlash<'d> {
    /// Create a new settings storage instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

// Implement the shared SettingsStorage trait
impl<'d> antlia_hal::SettingsStorage for Rp2040SettingsFlash<'d> {
    async fn read_slot(&mut self, slot: u8) -> Result<u32, StorageError> {
        let mut data_buffer = [0u8; 64];

        let result = map::fetch_item::<SlotKey, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &SlotKey(slot),
        )
        .await;

        match result {
            Ok(Some(data)) => {
                let bytes: [u8; SLOT_VALUE_LEN] =
                    data.try_into().map_err(|_| StorageError::Corrupted)?;
                Ok(u32::from_le_bytes(bytes))
            }
            Ok(None) => Err(StorageError::NotFound),
            Err(_) => Err(StorageError::Storage),
        }
    }

    async fn write_slot(&mut self, slot: u8, value: u32) -> Result<(), StorageError> {
        let mut data_buffer = [0u8; 64];
        let bytes = value.to_le_bytes();

        map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &SlotKey(slot),
            &bytes.as_slice(),
        )
        .await
        .map_err(|_| StorageError::Storage)
    }
}

/// Short alias used by the firmware
pub type SettingsFlash<'d> = Rp2040SettingsFlash<'d>;
