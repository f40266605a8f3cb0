//! Float switch task
//!
//! Watches the float switch input and reduces it to discrete
//! WaterPresent/WaterAbsent events: wait for an edge, let the contacts
//! settle, then report the level if it really changed.

use defmt::*;
use embassy_rp::gpio::{Input, Level};
use embassy_time::Timer;

use antlia_core::input::Input as RigInput;

use crate::channels::INPUT_CHANNEL;

/// Contact settle time after an edge
const SETTLE_MS: u64 = 30;

/// Float switch task - debounced water presence events
#[embassy_executor::task]
pub async fn float_switch_task(mut pin: Input<'static>) {
    info!("Float switch task started");

    let mut last_level = pin.get_level();
    // Report the power-on state once, so a rig already sitting in water
    // arms without needing an edge
    send_level(last_level).await;

    loop {
        pin.wait_for_any_edge().await;
        Timer::after_millis(SETTLE_MS).await;

        let level = pin.get_level();
        if level == last_level {
            continue;
        }
        last_level = level;
        send_level(level).await;
    }
}

/// The switch pulls the line to ground when water lifts the float
async fn send_level(level: Level) {
    let event = match level {
        Level::Low => RigInput::WaterPresent,
        Level::High => RigInput::WaterAbsent,
    };
    debug!("Float switch: {:?}", event);
    INPUT_CHANNEL.send(event).await;
}
