//! Three-button edit protocol
//!
//! Cursor positions 0..14 walk hour/minute digit pairs: 0-11 address the
//! six pump offsets (position / 2 is the pump), 12-13 the shared runtime.
//! A forward wrap back to position 0 with unsaved edits commits.

use crate::config::{SettingsStore, Slot};
use crate::sequence::PUMP_COUNT;

/// Cursor positions: two digits per pump row plus two for the runtime
pub const EDIT_POSITIONS: u8 = (PUMP_COUNT as u8 + 1) * 2;

// Minute deltas per press; even positions address the hour digit
const STEP_HOUR: i32 = 60;
const STEP_MINUTE: i32 = 1;
const STEP_HOUR_HELD: i32 = 540;
const STEP_MINUTE_HELD: i32 = 9;

/// What an advance press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditOutcome {
    /// Cursor moved, nothing else
    Moved,
    /// Cursor wrapped past the last position with edits pending:
    /// persist and reschedule
    Commit,
}

/// Cursor state and the pending-changes latch
#[derive(Debug)]
pub struct Editor {
    cursor: u8,
    pending: bool,
}

impl Editor {
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            pending: false,
        }
    }

    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// True while edits have not been committed
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Settings slot the cursor currently addresses
    pub fn slot(&self) -> Slot {
        let row = self.cursor / 2;
        if (row as usize) < PUMP_COUNT {
            Slot::PumpOffset(row)
        } else {
            Slot::Runtime
        }
    }

    /// True when the cursor addresses an hour digit
    pub fn on_hour_digit(&self) -> bool {
        self.cursor % 2 == 0
    }

    /// Advance short press: next position. Wrapping to the start with
    /// pending edits is the commit trigger, and clears the latch.
    pub fn advance(&mut self) -> EditOutcome {
        self.cursor = (self.cursor + 1) % EDIT_POSITIONS;
        if self.cursor == 0 && self.pending {
            self.pending = false;
            EditOutcome::Commit
        } else {
            EditOutcome::Moved
        }
    }

    /// Advance held: back one full row, bounded at the first position.
    /// Reverse navigation never commits.
    pub fn advance_hold(&mut self) -> EditOutcome {
        self.cursor = self.cursor.saturating_sub(2);
        EditOutcome::Moved
    }

    /// Apply a value edit at the cursor. `sign` is +1 or -1, `held`
    /// selects the large step. Returns the slot and its new value for the
    /// write-through save.
    pub fn adjust(&mut self, store: &mut SettingsStore, sign: i32, held: bool) -> (Slot, u32) {
        let magnitude = match (self.on_hour_digit(), held) {
            (true, false) => STEP_HOUR,
            (true, true) => STEP_HOUR_HELD,
            (false, false) => STEP_MINUTE,
            (false, true) => STEP_MINUTE_HELD,
        };
        let slot = self.slot();
        let value = store.modify(slot, sign * magnitude);
        self.pending = true;
        (slot, value)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cursor_wraps_forward() {
        let mut editor = Editor::new();
        for expected in 1..EDIT_POSITIONS {
            assert_eq!(editor.advance(), EditOutcome::Moved);
            assert_eq!(editor.cursor(), expected);
        }
        assert_eq!(editor.advance(), EditOutcome::Moved);
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn reverse_navigation_is_bounded_at_zero() {
        let mut editor = Editor::new();
        assert_eq!(editor.advance_hold(), EditOutcome::Moved);
        assert_eq!(editor.cursor(), 0);

        editor.advance();
        assert_eq!(editor.advance_hold(), EditOutcome::Moved);
        assert_eq!(editor.cursor(), 0);

        for _ in 0..5 {
            editor.advance();
        }
        editor.advance_hold();
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn wrap_commits_only_with_pending_edits() {
        let mut editor = Editor::new();
        let mut store = SettingsStore::new();

        // Clean wrap: no commit
        for _ in 0..EDIT_POSITIONS {
            assert_eq!(editor.advance(), EditOutcome::Moved);
        }

        // Edit, then wrap: exactly one commit, latch cleared
        editor.adjust(&mut store, 1, false);
        assert!(editor.pending());
        let mut commits = 0;
        for _ in 0..EDIT_POSITIONS {
            if editor.advance() == EditOutcome::Commit {
                commits += 1;
            }
        }
        assert_eq!(commits, 1);
        assert!(!editor.pending());
    }

    #[test]
    fn reverse_navigation_never_commits() {
        let mut editor = Editor::new();
        let mut store = SettingsStore::new();

        editor.advance();
        editor.adjust(&mut store, 1, false);
        // Back to position 0 the reverse way
        assert_eq!(editor.advance_hold(), EditOutcome::Moved);
        assert_eq!(editor.cursor(), 0);
        assert!(editor.pending());
    }

    #[test]
    fn cursor_addresses_the_right_slot() {
        let mut editor = Editor::new();

        assert_eq!(editor.slot(), Slot::PumpOffset(0));
        assert!(editor.on_hour_digit());

        editor.advance();
        assert_eq!(editor.slot(), Slot::PumpOffset(0));
        assert!(!editor.on_hour_digit());

        for _ in 0..11 {
            editor.advance();
        }
        assert_eq!(editor.cursor(), 12);
        assert_eq!(editor.slot(), Slot::Runtime);
        assert!(editor.on_hour_digit());
    }

    #[test]
    fn digit_position_selects_the_step() {
        let mut editor = Editor::new();
        let mut store = SettingsStore::new();

        // Hour digit of pump one
        assert_eq!(editor.adjust(&mut store, 1, false), (Slot::PumpOffset(0), 60));
        assert_eq!(editor.adjust(&mut store, 1, true), (Slot::PumpOffset(0), 600));

        // Minute digit of pump one
        editor.advance();
        assert_eq!(editor.adjust(&mut store, 1, false), (Slot::PumpOffset(0), 601));
        assert_eq!(editor.adjust(&mut store, 1, true), (Slot::PumpOffset(0), 610));
        assert_eq!(editor.adjust(&mut store, -1, true), (Slot::PumpOffset(0), 601));
    }

    proptest! {
        /// The cursor never leaves [0, EDIT_POSITIONS) under any input mix
        #[test]
        fn cursor_stays_in_bounds(moves in proptest::collection::vec(0u8..3, 0..128)) {
            let mut editor = Editor::new();
            let mut store = SettingsStore::new();
            for m in moves {
                match m {
                    0 => {
                        editor.advance();
                    }
                    1 => {
                        editor.advance_hold();
                    }
                    _ => {
                        editor.adjust(&mut store, -1, true);
                    }
                }
                prop_assert!(editor.cursor() < EDIT_POSITIONS);
            }
        }
    }
}
