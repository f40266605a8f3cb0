//! Discrete input events
//!
//! The button decoder and the float switch reduce raw hardware signals
//! to this closed vocabulary; everything downstream dispatches on it
//! through a single match.

pub mod buttons;

pub use buttons::{ButtonDecoder, LadderBands, LadderButton};

/// One discrete user or sensor event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Advance button, short press: next cursor position
    Advance,
    /// Advance button held: back one row
    AdvanceHold,
    /// Advance button double press. Part of the vocabulary but bound to
    /// no action.
    AdvanceDouble,
    /// Increase button, short press
    Increase,
    /// Increase button held: large step
    IncreaseHold,
    /// Decrease button, short press
    Decrease,
    /// Decrease button held: large step
    DecreaseHold,
    /// Float switch closed, water reached the intake
    WaterPresent,
    /// Float switch opened
    WaterAbsent,
}

impl Input {
    /// True for events originating from the button panel
    pub fn is_button(&self) -> bool {
        !self.is_water()
    }

    /// True for float switch events
    pub fn is_water(&self) -> bool {
        matches!(self, Input::WaterPresent | Input::WaterAbsent)
    }

    /// Signed direction of a value edit: +1, -1, or 0 for non-edits
    pub fn edit_direction(&self) -> i8 {
        match self {
            Input::Increase | Input::IncreaseHold => 1,
            Input::Decrease | Input::DecreaseHold => -1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_events_are_not_buttons() {
        assert!(Input::WaterPresent.is_water());
        assert!(Input::WaterAbsent.is_water());
        assert!(!Input::WaterPresent.is_button());
        assert!(Input::Advance.is_button());
        assert!(!Input::Advance.is_water());
    }

    #[test]
    fn edit_direction() {
        assert_eq!(Input::Increase.edit_direction(), 1);
        assert_eq!(Input::IncreaseHold.edit_direction(), 1);
        assert_eq!(Input::Decrease.edit_direction(), -1);
        assert_eq!(Input::Advance.edit_direction(), 0);
        assert_eq!(Input::WaterPresent.edit_direction(), 0);
    }
}
