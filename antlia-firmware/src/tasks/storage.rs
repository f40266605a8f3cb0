//! Settings persistence task
//!
//! Owns the flash storage after boot and drains write-through save
//! requests from the controller. Writes happen here, off the control
//! path, so an edit burst never stalls sequencing.

use defmt::*;

use antlia_core::config::{SettingsStore, Slot, SLOT_COUNT};
use antlia_hal_rp2040::flash::StorageError;
use antlia_hal_rp2040::{SettingsFlash, SettingsStorageTrait};

use crate::channels::SETTINGS_SAVE;

/// Read all slots into a settings store. Called from `main` before the
/// tasks are spawned. A slot that has never been written keeps its
/// default; any storage error degrades to defaults with the load-failure
/// flag set.
pub async fn load_settings(storage: &mut SettingsFlash<'static>) -> SettingsStore {
    let defaults = SettingsStore::new();
    let mut values = [0u32; SLOT_COUNT];
    let mut failed = false;

    for index in 0..SLOT_COUNT as u8 {
        // Indices below SLOT_COUNT always name a slot
        let Some(slot) = Slot::from_index(index) else {
            continue;
        };
        match storage.read_slot(index).await {
            Ok(value) => values[index as usize] = value,
            Err(StorageError::NotFound) => {
                values[index as usize] = defaults.get(slot);
            }
            Err(e) => {
                warn!("Failed to read slot {}: {:?}", index, e);
                failed = true;
            }
        }
    }

    if failed {
        SettingsStore::load_failed()
    } else {
        SettingsStore::from_snapshot(values)
    }
}

/// Storage task - handles flash persistence for settings edits
#[embassy_executor::task]
pub async fn storage_task(mut storage: SettingsFlash<'static>) {
    info!("Storage task started");

    loop {
        let request = SETTINGS_SAVE.receive().await;
        debug!(
            "Saving slot {} = {} min",
            request.slot.index(),
            request.value
        );

        match storage.write_slot(request.slot.index(), request.value).await {
            Ok(()) => trace!("Slot saved"),
            Err(e) => error!("Failed to save slot {}: {:?}", request.slot.index(), e),
        }
    }
}
