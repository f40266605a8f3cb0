//! Pump sequencing
//!
//! Converts the persisted offsets and shared runtime into a schedule of
//! pump start/stop actions and executes it against the actuator state.

pub mod engine;
pub mod queue;

pub use engine::{SequenceEvent, Sequencer};
pub use queue::{ActionQueue, PumpAction, Scheduled, MAX_ACTIONS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of pump outputs on the rig
pub const PUMP_COUNT: usize = 6;

/// Milliseconds per configured minute
pub const MS_PER_MIN: u64 = 60_000;

/// Timing parameters for one sequence run, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceConfig {
    /// Delay from arming to each pump's start
    pub offsets_min: [u32; PUMP_COUNT],
    /// How long each pump runs once started (shared by all six)
    pub runtime_min: u32,
}
