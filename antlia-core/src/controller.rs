//! Rig controller
//!
//! Single context value owning the settings store, the sequencing engine
//! and the edit cursor. The control loop feeds it input events and ticks,
//! then reads pump commands, save requests and notices back out; nothing
//! here lives in ambient statics.

use crate::config::{SettingsStore, Slot};
use crate::editor::{EditOutcome, Editor};
use crate::input::Input;
use crate::sequence::{SequenceEvent, Sequencer, PUMP_COUNT};

/// User-visible happenings, rendered as transient screen notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// Water reached the intake and the sequence armed
    WaterDetected,
    /// Pump `n` energized
    PumpStarted(u8),
    /// Pump `n` retired
    PumpStopped(u8),
    /// All samples drawn
    SequenceComplete,
    /// Sequence torn down after water loss (halt-on-dry rigs)
    SequenceHalted,
    /// Edits persisted and the schedule rebuilt
    ConfigCommitted,
}

/// Write-through persistence request for one mutated slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SaveRequest {
    pub slot: Slot,
    pub value: u32,
}

/// The rig: all mutable state behind one value
pub struct Rig {
    settings: SettingsStore,
    sequencer: Sequencer,
    editor: Editor,
    save_request: Option<SaveRequest>,
}

impl Rig {
    pub fn new(settings: SettingsStore, halt_on_dry: bool) -> Self {
        Self {
            settings,
            sequencer: Sequencer::new(halt_on_dry),
            editor: Editor::new(),
            save_request: None,
        }
    }

    /// Dispatch one discrete input event
    pub fn handle_input(&mut self, input: Input, now_ms: u64) -> Option<UiEvent> {
        match input {
            Input::Advance => match self.editor.advance() {
                EditOutcome::Commit => {
                    let config = self.settings.sequence_config();
                    self.sequencer.rearm(now_ms, &config);
                    Some(UiEvent::ConfigCommitted)
                }
                EditOutcome::Moved => None,
            },
            Input::AdvanceHold => {
                self.editor.advance_hold();
                None
            }
            // Reserved channel, bound to nothing
            Input::AdvanceDouble => None,
            Input::Increase => self.edit(1, false),
            Input::IncreaseHold => self.edit(1, true),
            Input::Decrease => self.edit(-1, false),
            Input::DecreaseHold => self.edit(-1, true),
            Input::WaterPresent => {
                let config = self.settings.sequence_config();
                self.sequencer
                    .on_water_present(now_ms, &config)
                    .map(|_| UiEvent::WaterDetected)
            }
            Input::WaterAbsent => self
                .sequencer
                .on_water_absent()
                .map(|_| UiEvent::SequenceHalted),
        }
    }

    fn edit(&mut self, sign: i32, held: bool) -> Option<UiEvent> {
        let (slot, value) = self.editor.adjust(&mut self.settings, sign, held);
        self.save_request = Some(SaveRequest { slot, value });
        None
    }

    /// Advance the engine clock
    pub fn tick(&mut self, now_ms: u64) -> Option<UiEvent> {
        let config = self.settings.sequence_config();
        self.sequencer.tick(now_ms, &config).map(|event| match event {
            SequenceEvent::Armed => UiEvent::WaterDetected,
            SequenceEvent::PumpStarted(n) => UiEvent::PumpStarted(n),
            SequenceEvent::PumpStopped(n) => UiEvent::PumpStopped(n),
            SequenceEvent::Complete => UiEvent::SequenceComplete,
            SequenceEvent::Halted => UiEvent::SequenceHalted,
        })
    }

    /// Pending write-through save, if an edit just happened
    pub fn take_save_request(&mut self) -> Option<SaveRequest> {
        self.save_request.take()
    }

    pub fn outputs(&self) -> [bool; PUMP_COUNT] {
        self.sequencer.outputs()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn cursor(&self) -> u8 {
        self.editor.cursor()
    }

    pub fn on_hour_digit(&self) -> bool {
        self.editor.on_hour_digit()
    }

    pub fn pending_changes(&self) -> bool {
        self.editor.pending()
    }

    pub fn is_armed(&self) -> bool {
        self.sequencer.is_armed()
    }

    pub fn active_pump(&self) -> Option<u8> {
        self.sequencer.active_pump()
    }

    /// Samples retired so far in the current run
    pub fn samples_done(&self) -> u8 {
        self.sequencer.retire_index()
    }
}
