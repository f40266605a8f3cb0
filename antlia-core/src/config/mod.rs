//! Persisted rig configuration
//!
//! Seven integers cover the whole configuration surface: one start offset
//! per pump plus the shared runtime. Values live in a typed in-memory
//! store and are written through to flash slot by slot.

pub mod slots;
pub mod store;

pub use slots::{Slot, SLOT_COUNT};
pub use store::{SettingsStore, DEFAULT_RUNTIME_MIN};
