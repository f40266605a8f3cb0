//! In-memory settings store
//!
//! Thin typed view over the seven persisted values. Edits are clamped at
//! zero; persistence itself is the storage task's job, the store only
//! reports the mutated slot and its new value to whoever asked for the
//! edit.

use super::slots::{Slot, SLOT_COUNT};
use crate::sequence::{SequenceConfig, PUMP_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Factory runtime when flash holds nothing
pub const DEFAULT_RUNTIME_MIN: u32 = 1;

const DEFAULT_VALUES: [u32; SLOT_COUNT] = [0, 0, 0, 0, 0, 0, DEFAULT_RUNTIME_MIN];

/// Typed, clamped access to the seven configuration values (minutes)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SettingsStore {
    values: [u32; SLOT_COUNT],
    /// False when the startup load failed; the rig runs on defaults and
    /// the condition is surfaced on screen
    loaded: bool,
}

impl SettingsStore {
    /// Store with factory defaults, marked cleanly loaded
    pub const fn new() -> Self {
        Self {
            values: DEFAULT_VALUES,
            loaded: true,
        }
    }

    /// Store seeded from a startup snapshot read out of flash
    pub const fn from_snapshot(values: [u32; SLOT_COUNT]) -> Self {
        Self {
            values,
            loaded: true,
        }
    }

    /// Store with defaults after a failed startup load. Execution
    /// continues in degraded mode rather than halting.
    pub const fn load_failed() -> Self {
        Self {
            values: DEFAULT_VALUES,
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current value of a slot, minutes
    pub fn get(&self, slot: Slot) -> u32 {
        self.values[slot.index() as usize]
    }

    /// Apply a signed delta, clamped at zero. Returns the new value.
    pub fn modify(&mut self, slot: Slot, delta_min: i32) -> u32 {
        let index = slot.index() as usize;
        let next = (self.values[index] as i64 + delta_min as i64)
            .clamp(0, u32::MAX as i64);
        self.values[index] = next as u32;
        self.values[index]
    }

    pub fn offsets_min(&self) -> [u32; PUMP_COUNT] {
        let mut offsets = [0u32; PUMP_COUNT];
        offsets.copy_from_slice(&self.values[..PUMP_COUNT]);
        offsets
    }

    pub fn runtime_min(&self) -> u32 {
        self.get(Slot::Runtime)
    }

    /// Timing parameters for the sequencer, from the current values
    pub fn sequence_config(&self) -> SequenceConfig {
        SequenceConfig {
            offsets_min: self.offsets_min(),
            runtime_min: self.runtime_min(),
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults() {
        let store = SettingsStore::new();
        for n in 0..PUMP_COUNT as u8 {
            assert_eq!(store.get(Slot::PumpOffset(n)), 0);
        }
        assert_eq!(store.runtime_min(), DEFAULT_RUNTIME_MIN);
        assert!(store.is_loaded());
    }

    #[test]
    fn load_failure_keeps_defaults_and_sets_flag() {
        let store = SettingsStore::load_failed();
        assert!(!store.is_loaded());
        assert_eq!(store.runtime_min(), DEFAULT_RUNTIME_MIN);
    }

    #[test]
    fn modify_accumulates() {
        let mut store = SettingsStore::new();
        store.modify(Slot::PumpOffset(0), 60);
        store.modify(Slot::PumpOffset(0), 60);
        store.modify(Slot::PumpOffset(0), 60);
        assert_eq!(store.get(Slot::PumpOffset(0)), 180);
    }

    #[test]
    fn decrement_clamps_at_zero() {
        let mut store = SettingsStore::new();
        assert_eq!(store.get(Slot::PumpOffset(1)), 0);
        assert_eq!(store.modify(Slot::PumpOffset(1), -1), 0);
        assert_eq!(store.modify(Slot::PumpOffset(1), -540), 0);

        store.modify(Slot::Runtime, -9);
        assert_eq!(store.runtime_min(), 0);
    }

    #[test]
    fn snapshot_reaches_the_sequencer_config() {
        let store = SettingsStore::from_snapshot([0, 1, 2, 3, 4, 5, 7]);
        let config = store.sequence_config();
        assert_eq!(config.offsets_min, [0, 1, 2, 3, 4, 5]);
        assert_eq!(config.runtime_min, 7);
    }

    proptest! {
        /// No sequence of edits may ever drive a value negative; the u32
        /// representation plus the clamp in `modify` guarantee it, and the
        /// clamp must also hold arithmetic at the top end.
        #[test]
        fn values_never_escape_range(deltas in proptest::collection::vec((0u8..7, -600i32..600), 0..64)) {
            let mut store = SettingsStore::new();
            for (index, delta) in deltas {
                let slot = Slot::from_index(index).unwrap();
                let value = store.modify(slot, delta);
                prop_assert_eq!(value, store.get(slot));
            }
        }
    }
}
