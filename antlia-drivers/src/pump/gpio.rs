//! GPIO pump output
//!
//! Drives a pump via a relay or MOSFET on a GPIO pin. Relay boards are
//! commonly active-low, so polarity is configurable; the logical state
//! the sequencer sees is independent of the wire level.

use antlia_core::traits::PumpOutput;

/// Trait for GPIO pin abstraction
pub trait OutputPin {
    /// Set the pin high
    fn set_high(&mut self);

    /// Set the pin low
    fn set_low(&mut self);

    /// Check if the pin is set high
    fn is_set_high(&self) -> bool;
}

/// GPIO pump output
pub struct GpioPump<P> {
    pin: P,
    /// If true, pump ON = pin LOW
    inverted: bool,
    /// Current logical state (true = pump on)
    on: bool,
}

impl<P: OutputPin> GpioPump<P> {
    /// Create a new GPIO pump output
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, pump is ON when the pin is LOW (active-low
    ///   relay boards)
    ///
    /// The output is forced to the off level immediately.
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut pump = Self {
            pin,
            inverted,
            on: false,
        };
        pump.set_on(false);
        pump
    }

    /// Create a new pump with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new pump with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> PumpOutput for GpioPump<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;

        if on != self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn active_high_pump() {
        let pin = MockPin::new();
        let mut pump = GpioPump::new_active_high(pin);

        assert!(!pump.is_on());
        assert!(!pump.pin.is_set_high());

        pump.set_on(true);
        assert!(pump.is_on());
        assert!(pump.pin.is_set_high());

        pump.set_on(false);
        assert!(!pump.is_on());
        assert!(!pump.pin.is_set_high());
    }

    #[test]
    fn active_low_pump() {
        let mut pin = MockPin::new();
        // Pin idles high on an active-low board
        pin.set_high();
        let mut pump = GpioPump::new_active_low(pin);

        // Construction forces the off level: high
        assert!(!pump.is_on());
        assert!(pump.pin.is_set_high());

        pump.set_on(true);
        assert!(pump.is_on());
        assert!(!pump.pin.is_set_high());

        pump.set_on(false);
        assert!(!pump.is_on());
        assert!(pump.pin.is_set_high());
    }
}
