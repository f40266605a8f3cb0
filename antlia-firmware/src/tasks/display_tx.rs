//! Panel UART transmit task
//!
//! Sends screen updates and heartbeat responses to the front panel.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use crate::channels::{HEARTBEAT_RECEIVED, SCREEN_UPDATE};
use crate::display::{protocol, Screen};

/// Shared screen buffer protected by mutex
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// Display TX task - sends frames to the panel
#[embassy_executor::task]
pub async fn display_tx_task(mut tx: BufferedUartTx) {
    info!("Display TX task started");

    let mut ticker = Ticker::every(Duration::from_millis(50));

    loop {
        // Answer a pending heartbeat first; the panel's link watchdog is
        // stricter than our redraw cadence
        if HEARTBEAT_RECEIVED.signaled() {
            HEARTBEAT_RECEIVED.reset();
            send_pong(&mut tx).await;
        }

        if SCREEN_UPDATE.signaled() {
            SCREEN_UPDATE.reset();
            send_screen_update(&mut tx).await;
        }

        ticker.next().await;
    }
}

/// Send PONG response to the panel
async fn send_pong(tx: &mut BufferedUartTx) {
    if let Ok(frame) = protocol::pong_frame() {
        let mut buf = [0u8; 64];
        if let Ok(len) = frame.encode(&mut buf) {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send PONG: {:?}", e);
            } else {
                trace!("PONG sent");
            }
        }
    }
}

/// Send current screen content to the panel
async fn send_screen_update(tx: &mut BufferedUartTx) {
    let screen = SCREEN_BUFFER.lock().await;

    for frame in protocol::encode_screen(&screen) {
        let mut buf = [0u8; 64];
        if let Ok(len) = frame.encode(&mut buf) {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send screen frame: {:?}", e);
                break;
            }
        }
    }

    trace!("Screen update sent");
}
