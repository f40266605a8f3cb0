//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use antlia_core::controller::SaveRequest;
use antlia_core::input::Input;
use antlia_core::sequence::PUMP_COUNT;

/// Channel capacity for input events (buttons + float switch)
const INPUT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for settings save requests
const SAVE_CHANNEL_SIZE: usize = 8;

/// Discrete input events from the button decoder and the float switch
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, Input, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Write-through settings saves from the controller to the storage task.
/// A channel, not a signal: a burst of edits must not lose writes.
pub static SETTINGS_SAVE: Channel<CriticalSectionRawMutex, SaveRequest, SAVE_CHANNEL_SIZE> =
    Channel::new();

/// Pump output command (updated by controller, applied by the pump task)
pub static PUMP_CMD: Signal<CriticalSectionRawMutex, [bool; PUMP_COUNT]> = Signal::new();

/// Signal that a screen update is ready to be sent
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that a heartbeat (PING) was received from the panel
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();
