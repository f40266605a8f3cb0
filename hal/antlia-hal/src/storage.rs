//! Persistent settings storage abstraction
//!
//! The rig's whole configuration is seven integers, each stored under its
//! own slot index. Indices are stable across firmware versions; the
//! storage implementation handles wear leveling and data integrity.

/// On-flash key for one settings slot (the slot's stable index, 0-6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotKey(pub u8);

/// Errors from settings storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Flash operation failed
    Flash,
    /// Storage layer operation failed
    Storage,
    /// Slot has never been written
    NotFound,
    /// Stored data is not a valid slot value
    Corrupted,
}

/// Slot-keyed persistent storage
///
/// Implementations should provide wear leveling and integrity checking;
/// a torn write must surface as `Corrupted` or `NotFound`, never as a
/// wrong value.
pub trait SettingsStorage {
    /// Read one slot's value
    fn read_slot(
        &mut self,
        slot: u8,
    ) -> impl core::future::Future<Output = Result<u32, StorageError>>;

    /// Write one slot's value
    fn write_slot(
        &mut self,
        slot: u8,
        value: u32,
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for SlotKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.0;
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        Ok((SlotKey(buffer[0]), 1))
    }
}
