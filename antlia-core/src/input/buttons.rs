//! Analog button ladder decoder
//!
//! The panel wires all three buttons to one ADC line through a resistor
//! ladder; which button is down is recovered from the voltage band the
//! reading falls into. The decoder debounces the raw band, times holds,
//! and collapses quick advance press pairs into a double-press event.
//!
//! Short presses are reported on release so they can be told apart from
//! holds; an advance release is additionally held back for the double
//! press window before it is reported.

use super::Input;

/// Hold threshold: a press this long is a hold, not a click
pub const HOLD_MS: u64 = 500;

/// Two advance releases inside this window form a double press
pub const DOUBLE_PRESS_MS: u64 = 400;

/// Consecutive identical samples required to accept a band change
const DEBOUNCE_SAMPLES: u8 = 2;

/// The three physical buttons on the shared ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LadderButton {
    Advance,
    Increase,
    Decrease,
}

/// ADC band ceilings for a 12-bit reading, lowest band first.
/// The idle line floats to full scale.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LadderBands {
    pub advance_max: u16,
    pub increase_max: u16,
    pub decrease_max: u16,
}

impl LadderBands {
    /// Which button a raw reading falls on, if any
    pub fn classify(&self, raw: u16) -> Option<LadderButton> {
        if raw <= self.advance_max {
            Some(LadderButton::Advance)
        } else if raw <= self.increase_max {
            Some(LadderButton::Increase)
        } else if raw <= self.decrease_max {
            Some(LadderButton::Decrease)
        } else {
            None
        }
    }
}

impl Default for LadderBands {
    fn default() -> Self {
        Self {
            advance_max: 600,
            increase_max: 1800,
            decrease_max: 3000,
        }
    }
}

/// Stateful sample-fed decoder producing discrete [`Input`] events
#[derive(Debug)]
pub struct ButtonDecoder {
    bands: LadderBands,
    /// Debounced band currently accepted
    stable: Option<LadderButton>,
    candidate: Option<LadderButton>,
    candidate_count: u8,
    pressed_at_ms: u64,
    hold_fired: bool,
    /// Advance release waiting out the double-press window
    pending_advance_ms: Option<u64>,
}

impl ButtonDecoder {
    pub fn new(bands: LadderBands) -> Self {
        Self {
            bands,
            stable: None,
            candidate: None,
            candidate_count: 0,
            pressed_at_ms: 0,
            hold_fired: false,
            pending_advance_ms: None,
        }
    }

    /// Feed one ADC sample. Call at a steady cadence (10 ms); at most one
    /// event is produced per sample.
    pub fn feed(&mut self, raw: u16, now_ms: u64) -> Option<Input> {
        let sample = self.bands.classify(raw);

        if sample != self.stable {
            if sample == self.candidate {
                self.candidate_count = self.candidate_count.saturating_add(1);
            } else {
                self.candidate = sample;
                self.candidate_count = 1;
            }
            if self.candidate_count >= DEBOUNCE_SAMPLES {
                return self.accept(sample, now_ms);
            }
        } else {
            self.candidate = None;
            self.candidate_count = 0;
        }

        self.poll_timers(now_ms)
    }

    /// Apply a debounced band change
    fn accept(&mut self, sample: Option<LadderButton>, now_ms: u64) -> Option<Input> {
        let previous = self.stable;
        self.stable = sample;
        self.candidate = None;
        self.candidate_count = 0;

        match (previous, sample) {
            (None, Some(_)) => {
                self.pressed_at_ms = now_ms;
                self.hold_fired = false;
                None
            }
            (Some(button), None) => self.released(button, now_ms),
            // Direct band-to-band transition: treat as a fresh press of
            // the new button and swallow the old one.
            (Some(_), Some(_)) => {
                self.pressed_at_ms = now_ms;
                self.hold_fired = false;
                None
            }
            (None, None) => None,
        }
    }

    fn released(&mut self, button: LadderButton, now_ms: u64) -> Option<Input> {
        if self.hold_fired {
            self.hold_fired = false;
            return None;
        }
        match button {
            LadderButton::Advance => {
                if self.pending_advance_ms.take().is_some() {
                    Some(Input::AdvanceDouble)
                } else {
                    self.pending_advance_ms = Some(now_ms);
                    None
                }
            }
            LadderButton::Increase => Some(Input::Increase),
            LadderButton::Decrease => Some(Input::Decrease),
        }
    }

    /// Hold detection and double-press window expiry
    fn poll_timers(&mut self, now_ms: u64) -> Option<Input> {
        if let Some(button) = self.stable {
            if !self.hold_fired && now_ms.saturating_sub(self.pressed_at_ms) >= HOLD_MS {
                self.hold_fired = true;
                return Some(match button {
                    LadderButton::Advance => Input::AdvanceHold,
                    LadderButton::Increase => Input::IncreaseHold,
                    LadderButton::Decrease => Input::DecreaseHold,
                });
            }
        }

        if let Some(released_ms) = self.pending_advance_ms {
            if now_ms.saturating_sub(released_ms) > DOUBLE_PRESS_MS {
                self.pending_advance_ms = None;
                return Some(Input::Advance);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: u16 = 4000;
    const ADVANCE: u16 = 200;
    const INCREASE: u16 = 1200;
    const DECREASE: u16 = 2500;

    fn decoder() -> ButtonDecoder {
        ButtonDecoder::new(LadderBands::default())
    }

    /// Feed `raw` every 10 ms over `duration_ms`, collecting events
    fn feed_for(
        dec: &mut ButtonDecoder,
        raw: u16,
        start_ms: u64,
        duration_ms: u64,
    ) -> (heapless::Vec<Input, 8>, u64) {
        let mut events = heapless::Vec::new();
        let mut now = start_ms;
        while now < start_ms + duration_ms {
            if let Some(event) = dec.feed(raw, now) {
                let _ = events.push(event);
            }
            now += 10;
        }
        (events, now)
    }

    #[test]
    fn band_classification() {
        let bands = LadderBands::default();
        assert_eq!(bands.classify(ADVANCE), Some(LadderButton::Advance));
        assert_eq!(bands.classify(INCREASE), Some(LadderButton::Increase));
        assert_eq!(bands.classify(DECREASE), Some(LadderButton::Decrease));
        assert_eq!(bands.classify(IDLE), None);
    }

    #[test]
    fn short_press_fires_on_release() {
        let mut dec = decoder();
        let (events, now) = feed_for(&mut dec, INCREASE, 0, 100);
        assert!(events.is_empty());

        let (events, _) = feed_for(&mut dec, IDLE, now, 100);
        assert_eq!(events.as_slice(), &[Input::Increase]);
    }

    #[test]
    fn hold_fires_once_while_pressed() {
        let mut dec = decoder();
        let (events, now) = feed_for(&mut dec, DECREASE, 0, 800);
        assert_eq!(events.as_slice(), &[Input::DecreaseHold]);

        // Release after a hold produces nothing further
        let (events, _) = feed_for(&mut dec, IDLE, now, 100);
        assert!(events.is_empty());
    }

    #[test]
    fn advance_click_waits_out_the_double_window() {
        let mut dec = decoder();
        let (events, now) = feed_for(&mut dec, ADVANCE, 0, 100);
        assert!(events.is_empty());

        // Released, but not reported until the window passes
        let (events, now) = feed_for(&mut dec, IDLE, now, 200);
        assert!(events.is_empty());
        let (events, _) = feed_for(&mut dec, IDLE, now, 400);
        assert_eq!(events.as_slice(), &[Input::Advance]);
    }

    #[test]
    fn two_quick_advance_presses_form_a_double() {
        let mut dec = decoder();
        let (_, now) = feed_for(&mut dec, ADVANCE, 0, 80);
        let (_, now) = feed_for(&mut dec, IDLE, now, 80);
        let (events, now) = feed_for(&mut dec, ADVANCE, now, 80);
        assert!(events.is_empty());

        let (events, now) = feed_for(&mut dec, IDLE, now, 100);
        assert_eq!(events.as_slice(), &[Input::AdvanceDouble]);

        // And nothing trails once the window expires
        let (events, _) = feed_for(&mut dec, IDLE, now, 600);
        assert!(events.is_empty());
    }

    #[test]
    fn single_sample_glitch_is_debounced_away() {
        let mut dec = decoder();
        let (_, now) = feed_for(&mut dec, IDLE, 0, 50);
        // One stray low sample, then idle again
        assert_eq!(dec.feed(ADVANCE, now), None);
        let (events, _) = feed_for(&mut dec, IDLE, now + 10, 1000);
        assert!(events.is_empty());
    }
}
