//! ADC reader for the analog button ladder
//!
//! All three panel buttons share one ADC line through a resistor ladder;
//! this wrapper just produces raw 12-bit samples. Band classification
//! and debouncing are chip-independent and live in `antlia-core`.

use embassy_rp::adc::{Adc, Async, Channel};

/// The button ladder's ADC channel
pub struct ButtonAdc<'d> {
    adc: Adc<'d, Async>,
    channel: Channel<'d>,
}

impl<'d> ButtonAdc<'d> {
    pub fn new(adc: Adc<'d, Async>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }

    /// One raw sample, or None on a conversion error
    pub async fn sample(&mut self) -> Option<u16> {
        self.adc.read(&mut self.channel).await.ok()
    }
}
