//! Sequencing engine
//!
//! Owns the actuator state. Water detection arms the engine, which queues
//! one start per pump at its configured offset from the detection instant;
//! each start stops every other pump before energizing its own output, so
//! at most one pump is ever active regardless of how stop actions land.

use super::queue::{ActionQueue, PumpAction, Scheduled};
use super::{SequenceConfig, MS_PER_MIN, PUMP_COUNT};

/// Observable engine transitions, surfaced to the UI as notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceEvent {
    /// Water detected, schedule laid down
    Armed,
    /// Pump `n` energized
    PumpStarted(u8),
    /// Pump `n` retired after its runtime
    PumpStopped(u8),
    /// All six pumps have run and retired
    Complete,
    /// Outputs dropped after water loss (halt-on-dry rigs only)
    Halted,
}

/// The sequencing engine
///
/// Advanced by a periodic `tick(now_ms)`; all times are absolute
/// milliseconds from the same clock.
#[derive(Debug)]
pub struct Sequencer {
    queue: ActionQueue,
    active: [bool; PUMP_COUNT],
    armed: bool,
    generation: u16,
    /// Starts fired this run (next pump to start)
    arm_index: u8,
    /// Stops fired this run (next pump to retire)
    retire_index: u8,
    /// When set, water loss tears the sequence down instead of being
    /// ignored
    halt_on_dry: bool,
}

impl Sequencer {
    pub fn new(halt_on_dry: bool) -> Self {
        Self {
            queue: ActionQueue::new(),
            active: [false; PUMP_COUNT],
            armed: false,
            generation: 0,
            arm_index: 0,
            retire_index: 0,
            halt_on_dry,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Current actuator command state
    pub fn outputs(&self) -> [bool; PUMP_COUNT] {
        self.active
    }

    /// Index of the currently energized pump, if any
    pub fn active_pump(&self) -> Option<u8> {
        self.active.iter().position(|&on| on).map(|i| i as u8)
    }

    /// Starts fired since the last (re)arm
    pub fn arm_index(&self) -> u8 {
        self.arm_index
    }

    /// Stops fired since the last (re)arm
    pub fn retire_index(&self) -> u8 {
        self.retire_index
    }

    /// Water reached the intake. Arms the engine if idle; a chattering
    /// float switch must not restart a schedule already in progress.
    pub fn on_water_present(
        &mut self,
        now_ms: u64,
        config: &SequenceConfig,
    ) -> Option<SequenceEvent> {
        if self.armed {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        self.arm_index = 0;
        self.retire_index = 0;
        self.schedule_starts(now_ms, config);
        Some(SequenceEvent::Armed)
    }

    /// Water left the intake. On the stock rig a sample run is committed
    /// once started and this is a no-op; halt-on-dry rigs tear down.
    pub fn on_water_absent(&mut self) -> Option<SequenceEvent> {
        if self.halt_on_dry && self.armed {
            self.disarm();
            Some(SequenceEvent::Halted)
        } else {
            None
        }
    }

    /// Commit path: retire the outstanding schedule and lay down a fresh
    /// one from `now_ms` with the committed configuration. Every
    /// previously queued action becomes stale, and all outputs are
    /// dropped before the new schedule begins. The armed flag is left as
    /// it was, so a commit on an idle rig schedules actions that expire
    /// as no-ops.
    pub fn rearm(&mut self, now_ms: u64, config: &SequenceConfig) {
        self.generation = self.generation.wrapping_add(1);
        self.stop_all();
        self.arm_index = 0;
        self.retire_index = 0;
        self.schedule_starts(now_ms, config);
    }

    /// Tear the sequence down: outputs off, outstanding actions stale.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.generation = self.generation.wrapping_add(1);
        self.stop_all();
    }

    fn stop_all(&mut self) {
        self.active = [false; PUMP_COUNT];
    }

    fn schedule_starts(&mut self, now_ms: u64, config: &SequenceConfig) {
        for (i, offset_min) in config.offsets_min.iter().enumerate() {
            let entry = Scheduled {
                due_ms: now_ms + *offset_min as u64 * MS_PER_MIN,
                action: PumpAction::Start(i as u8),
                generation: self.generation,
            };
            let _ = self.queue.push(entry, self.generation);
        }
    }

    /// Advance time. Due actions fire in registration order; stale and
    /// disarmed actions are consumed without touching any output. Returns
    /// the last event of this tick for the UI.
    pub fn tick(&mut self, now_ms: u64, config: &SequenceConfig) -> Option<SequenceEvent> {
        let mut event = None;
        while let Some(entry) = self.queue.pop_due(now_ms) {
            if entry.generation != self.generation || !self.armed {
                continue;
            }
            match entry.action {
                PumpAction::Start(i) => {
                    // Stop everything else first: the previous pump's stop
                    // may be queued behind this entry in the same tick.
                    for (j, out) in self.active.iter_mut().enumerate() {
                        if j != i as usize {
                            *out = false;
                        }
                    }
                    self.active[i as usize] = true;
                    self.arm_index = self.arm_index.saturating_add(1);

                    let stop = Scheduled {
                        due_ms: now_ms + config.runtime_min as u64 * MS_PER_MIN,
                        action: PumpAction::Stop(i),
                        generation: entry.generation,
                    };
                    let _ = self.queue.push(stop, self.generation);
                    event = Some(SequenceEvent::PumpStarted(i));
                }
                PumpAction::Stop(i) => {
                    self.active[i as usize] = false;
                    self.retire_index = self.retire_index.saturating_add(1);
                    event = if self.retire_index as usize >= PUMP_COUNT {
                        Some(SequenceEvent::Complete)
                    } else {
                        Some(SequenceEvent::PumpStopped(i))
                    };
                }
            }
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(offsets_min: [u32; PUMP_COUNT], runtime_min: u32) -> SequenceConfig {
        SequenceConfig {
            offsets_min,
            runtime_min,
        }
    }

    fn exactly_one_active(seq: &Sequencer, pump: u8) -> bool {
        seq.outputs()
            .iter()
            .enumerate()
            .all(|(i, &on)| on == (i == pump as usize))
    }

    #[test]
    fn arming_schedules_and_starts_first_pump() {
        let mut seq = Sequencer::new(false);
        let cfg = config([0, 1, 2, 3, 4, 5], 1);

        assert_eq!(
            seq.on_water_present(0, &cfg),
            Some(SequenceEvent::Armed)
        );
        assert!(seq.is_armed());

        assert_eq!(seq.tick(0, &cfg), Some(SequenceEvent::PumpStarted(0)));
        assert!(exactly_one_active(&seq, 0));
        assert_eq!(seq.arm_index(), 1);
    }

    #[test]
    fn full_sequence_runs_one_pump_per_minute() {
        let mut seq = Sequencer::new(false);
        let cfg = config([0, 1, 2, 3, 4, 5], 1);

        seq.on_water_present(0, &cfg);
        seq.tick(0, &cfg);

        // Each minute boundary hands over to the next pump. The handover
        // tick fires the next start before the previous stop, so the
        // mutual exclusion hinges on the start's stop-everything-else.
        for minute in 1..6u64 {
            seq.tick(minute * MS_PER_MIN, &cfg);
            assert!(exactly_one_active(&seq, minute as u8));
        }

        assert_eq!(
            seq.tick(6 * MS_PER_MIN, &cfg),
            Some(SequenceEvent::Complete)
        );
        assert_eq!(seq.outputs(), [false; PUMP_COUNT]);
        assert_eq!(seq.retire_index(), PUMP_COUNT as u8);
        // The run is over but the engine stays armed until torn down
        assert!(seq.is_armed());
    }

    #[test]
    fn repeated_water_present_is_a_no_op() {
        let mut seq = Sequencer::new(false);
        let cfg = config([0, 1, 2, 3, 4, 5], 1);

        seq.on_water_present(0, &cfg);
        seq.tick(0, &cfg);
        let outputs = seq.outputs();
        let arm = seq.arm_index();
        let retire = seq.retire_index();

        assert_eq!(seq.on_water_present(30_000, &cfg), None);
        assert_eq!(seq.outputs(), outputs);
        assert_eq!(seq.arm_index(), arm);
        assert_eq!(seq.retire_index(), retire);
    }

    #[test]
    fn water_absent_is_ignored_by_default() {
        let mut seq = Sequencer::new(false);
        let cfg = config([0, 9, 9, 9, 9, 9], 5);

        seq.on_water_present(0, &cfg);
        seq.tick(0, &cfg);
        assert!(exactly_one_active(&seq, 0));

        assert_eq!(seq.on_water_absent(), None);
        assert!(exactly_one_active(&seq, 0));
        assert!(seq.is_armed());
    }

    #[test]
    fn halt_on_dry_stops_outputs() {
        let mut seq = Sequencer::new(true);
        let cfg = config([0, 9, 9, 9, 9, 9], 5);

        seq.on_water_present(0, &cfg);
        seq.tick(0, &cfg);
        assert!(exactly_one_active(&seq, 0));

        assert_eq!(seq.on_water_absent(), Some(SequenceEvent::Halted));
        assert_eq!(seq.outputs(), [false; PUMP_COUNT]);
        assert!(!seq.is_armed());

        // A fresh detection starts over from pump one
        assert_eq!(
            seq.on_water_present(120_000, &cfg),
            Some(SequenceEvent::Armed)
        );
        seq.tick(120_000, &cfg);
        assert!(exactly_one_active(&seq, 0));
    }

    #[test]
    fn rearm_retires_the_old_schedule() {
        let mut seq = Sequencer::new(false);
        let before = config([1, 9, 9, 9, 9, 9], 1);

        seq.on_water_present(0, &before);

        // Commit at 30s with a larger first offset
        let after = config([2, 9, 9, 9, 9, 9], 1);
        seq.rearm(30_000, &after);

        // The old start (due 60s) is stale and must not energize anything
        assert_eq!(seq.tick(60_000, &after), None);
        assert_eq!(seq.outputs(), [false; PUMP_COUNT]);

        // The new start fires at 30s + 2min
        assert_eq!(
            seq.tick(150_000, &after),
            Some(SequenceEvent::PumpStarted(0))
        );
    }

    #[test]
    fn rearm_drops_the_running_pump_and_resets_counters() {
        let mut seq = Sequencer::new(false);
        let cfg = config([0, 1, 2, 3, 4, 5], 9);

        seq.on_water_present(0, &cfg);
        seq.tick(0, &cfg);
        assert!(exactly_one_active(&seq, 0));
        assert_eq!(seq.arm_index(), 1);

        seq.rearm(10_000, &cfg);
        assert_eq!(seq.outputs(), [false; PUMP_COUNT]);
        assert_eq!(seq.arm_index(), 0);
        assert_eq!(seq.retire_index(), 0);
        assert!(seq.is_armed());

        // New schedule runs from the commit instant
        assert_eq!(seq.tick(10_000, &cfg), Some(SequenceEvent::PumpStarted(0)));
    }

    #[test]
    fn rearm_while_idle_schedules_only_no_ops() {
        let mut seq = Sequencer::new(false);
        let cfg = config([0, 0, 0, 0, 0, 0], 1);

        // Commit before any water was ever seen
        seq.rearm(0, &cfg);
        assert!(!seq.is_armed());

        assert_eq!(seq.tick(0, &cfg), None);
        assert_eq!(seq.outputs(), [false; PUMP_COUNT]);
    }

    #[test]
    fn zero_offsets_collapse_to_the_last_pump() {
        let mut seq = Sequencer::new(false);
        let cfg = config([0, 0, 0, 0, 0, 0], 1);

        seq.on_water_present(0, &cfg);
        seq.tick(0, &cfg);

        // All six starts fire in one tick, FIFO; each displaces the
        // previous, leaving only pump six energized.
        assert!(exactly_one_active(&seq, 5));
        assert_eq!(seq.arm_index(), PUMP_COUNT as u8);
    }
}
