//! Main controller task
//!
//! Owns the rig (settings + sequencer + editor) and runs the control
//! loop: input events and ticks in, pump commands, save requests and
//! screen updates out.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Instant;

use antlia_core::config::SettingsStore;
use antlia_core::controller::Rig;

use crate::channels::{INPUT_CHANNEL, PUMP_CMD, SCREEN_UPDATE, SETTINGS_SAVE};
use crate::display::Renderer;
use crate::tasks::display_tx::SCREEN_BUFFER;
use crate::tasks::tick::TICK_SIGNAL;

/// Blink phase flips every 5 ticks (500ms at the 100ms tick)
const BLINK_TICKS: u32 = 5;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(settings: SettingsStore) {
    info!("Controller task started");

    let mut rig = Rig::new(settings, cfg!(feature = "halt-on-dry"));
    let mut renderer = Renderer::new();
    let mut blink_on = true;
    let mut ticks: u32 = 0;

    renderer.render_boot();
    push_screen(&renderer).await;

    // Everything off until the float switch says otherwise
    PUMP_CMD.signal(rig.outputs());

    loop {
        match select(INPUT_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(input) => {
                debug!("Input: {:?}", input);
                let now_ms = Instant::now().as_millis();

                if let Some(event) = rig.handle_input(input, now_ms) {
                    info!("Event: {:?}", event);
                    renderer.show_event(event);
                }

                // Write-through: every edit goes straight to flash
                if let Some(save) = rig.take_save_request() {
                    if SETTINGS_SAVE.try_send(save).is_err() {
                        warn!("Save queue full, dropping slot write");
                    }
                }
            }
            Either::Second(now_ms) => {
                if let Some(event) = rig.tick(now_ms) {
                    info!("Event: {:?}", event);
                    renderer.show_event(event);
                }

                ticks = ticks.wrapping_add(1);
                if ticks % BLINK_TICKS == 0 {
                    blink_on = !blink_on;
                }
                renderer.tick();
            }
        }

        PUMP_CMD.signal(rig.outputs());
        renderer.render(&rig, blink_on);
        push_screen(&renderer).await;
    }
}

/// Copy the rendered screen into the shared buffer and wake the TX task
async fn push_screen(renderer: &Renderer) {
    {
        let mut screen = SCREEN_BUFFER.lock().await;
        *screen = renderer.screen().clone();
    }
    SCREEN_UPDATE.signal(());
}
