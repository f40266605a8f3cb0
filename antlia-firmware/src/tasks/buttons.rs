//! Button sampling task
//!
//! Samples the analog button ladder and feeds the decoder; accepted
//! events go into the input channel. The decoder itself (band
//! classification, debounce, hold and double-press timing) lives in
//! `antlia-core` where it is tested on the host.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use antlia_core::input::{ButtonDecoder, LadderBands};
use antlia_hal_rp2040::ButtonAdc;

use crate::channels::INPUT_CHANNEL;

/// Ladder sampling interval
pub const SAMPLE_INTERVAL_MS: u64 = 10;

/// Button task - samples the ladder and emits discrete input events
#[embassy_executor::task]
pub async fn buttons_task(mut adc: ButtonAdc<'static>) {
    info!("Button task started");

    let mut decoder = ButtonDecoder::new(LadderBands::default());
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));

    loop {
        ticker.next().await;

        let Some(raw) = adc.sample().await else {
            // Conversion error: skip the sample, the debounce absorbs it
            continue;
        };

        if let Some(event) = decoder.feed(raw, Instant::now().as_millis()) {
            debug!("Button event: {:?}", event);
            if INPUT_CHANNEL.try_send(event).is_err() {
                warn!("Input channel full, dropping event");
            }
        }
    }
}
