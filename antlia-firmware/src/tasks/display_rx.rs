//! Panel UART receive task
//!
//! Receives frames from the front panel. The panel originates nothing
//! but heartbeats; anything else is logged and dropped.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use antlia_protocol::{PanelReport, Parser};

use crate::channels::HEARTBEAT_RECEIVED;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Display RX task - receives and parses frames from the panel
#[embassy_executor::task]
pub async fn display_rx_task(mut rx: BufferedUartRx) {
    info!("Display RX task started");

    let mut parser = Parser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match parser.push(byte) {
                        Ok(Some(frame)) => match PanelReport::from_frame(&frame) {
                            Ok(PanelReport::Ping) => {
                                trace!("PING received");
                                HEARTBEAT_RECEIVED.signal(());
                            }
                            Err(e) => {
                                warn!("Unexpected panel frame: {:?}", e);
                            }
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
