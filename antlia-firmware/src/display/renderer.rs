//! Screen rendering
//!
//! Builds screens for the front panel: the pump offset page, the runtime
//! page, and transient notices. The panel is an 8x21 character display
//! with per-row inversion.
//!
//! Notices do not block anything: they are a countdown held here and the
//! regular page simply resumes when it reaches zero. The addressed digit
//! blinks by being blanked on alternate blink phases.

use core::fmt::Write;

use antlia_core::controller::{Rig, UiEvent};
use antlia_core::sequence::PUMP_COUNT;
use antlia_protocol::{PANEL_COLS, PANEL_ROWS};
use heapless::String;

/// How many 100ms ticks a transient notice stays up
const NOTICE_TICKS: u8 = 8;

const LINE_LEN: usize = PANEL_COLS as usize + 1;

/// A screen buffer that can be sent to the panel
#[derive(Clone)]
pub struct Screen {
    /// Lines of text (8 rows)
    lines: [String<LINE_LEN>; PANEL_ROWS as usize],
    /// Row drawn inverted (active pump highlight)
    inverted_row: Option<u8>,
}

impl Screen {
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
            inverted_row: None,
        }
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.inverted_row = None;
    }

    /// Set text at a specific row, clipped to the panel width
    pub fn set_line(&mut self, row: u8, text: &str) {
        if let Some(line) = self.lines.get_mut(row as usize) {
            line.clear();
            let _ = line.push_str(&text[..text.len().min(PANEL_COLS as usize)]);
        }
    }

    pub fn set_inverted(&mut self, row: u8) {
        if row < PANEL_ROWS {
            self.inverted_row = Some(row);
        }
    }

    pub fn get_line(&self, row: u8) -> &str {
        self.lines
            .get(row as usize)
            .map(|l| l.as_str())
            .unwrap_or("")
    }

    pub fn inverted_row(&self) -> Option<u8> {
        self.inverted_row
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// A transient two-line notification
struct Notice {
    top: String<LINE_LEN>,
    bottom: String<LINE_LEN>,
    ticks_left: u8,
}

/// Screen renderer
pub struct Renderer {
    screen: Screen,
    notice: Option<Notice>,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
            notice: None,
        }
    }

    /// Current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the boot screen
    pub fn render_boot(&mut self) {
        self.screen.clear();
        self.screen.set_line(2, "      ANTLIA");
        self.screen.set_line(4, "   Water Sampler");
    }

    /// Queue the transient notice for an event, if it has one
    pub fn show_event(&mut self, event: UiEvent) {
        let mut top: String<LINE_LEN> = String::new();
        let mut bottom: String<LINE_LEN> = String::new();
        match event {
            UiEvent::WaterDetected => {
                let _ = top.push_str("Water?");
            }
            UiEvent::PumpStarted(n) => {
                let _ = top.push_str("Started");
                let _ = write!(bottom, "Pump {}", n + 1);
            }
            // Retiring a pump is routine, no notice
            UiEvent::PumpStopped(_) => return,
            UiEvent::SequenceComplete => {
                let _ = top.push_str("Sampling");
                let _ = bottom.push_str("complete");
            }
            UiEvent::SequenceHalted => {
                let _ = top.push_str("Water lost");
                let _ = bottom.push_str("outputs off");
            }
            UiEvent::ConfigCommitted => {
                let _ = top.push_str("Saving");
                let _ = bottom.push_str("config");
            }
        }

        self.notice = Some(Notice {
            top,
            bottom,
            ticks_left: NOTICE_TICKS,
        });
    }

    /// Count the current notice down one tick
    pub fn tick(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }

    /// Rebuild the screen from the rig state. `blink_on` is the 500ms
    /// blink phase; the addressed digit is blanked in the off phase.
    pub fn render(&mut self, rig: &Rig, blink_on: bool) {
        if let Some(notice) = &self.notice {
            let top = notice.top.clone();
            let bottom = notice.bottom.clone();
            self.screen.clear();
            self.screen.set_line(3, &top);
            self.screen.set_line(4, &bottom);
            return;
        }

        if rig.cursor() < (PUMP_COUNT as u8) * 2 {
            self.render_pump_page(rig, blink_on);
        } else {
            self.render_runtime_page(rig, blink_on);
        }
    }

    /// Page 1: one row per pump, active pump inverted, addressed digit
    /// blinking
    fn render_pump_page(&mut self, rig: &Rig, blink_on: bool) {
        self.screen.clear();
        self.screen.set_line(0, "=== SAMPLE TIMES ===");

        let cursor_row = rig.cursor() / 2;
        let offsets = rig.settings().offsets_min();
        for (i, &minutes) in offsets.iter().enumerate() {
            let addressed = cursor_row as usize == i;
            let line = value_line_prefixed(i as u8, minutes, addressed, rig, blink_on);
            self.screen.set_line(i as u8 + 1, &line);
        }

        if let Some(active) = rig.active_pump() {
            self.screen.set_inverted(active + 1);
        }

        let status = status_line(rig);
        self.screen.set_line(PANEL_ROWS - 1, &status);
    }

    /// Page 2: the shared runtime
    fn render_runtime_page(&mut self, rig: &Rig, blink_on: bool) {
        self.screen.clear();
        self.screen.set_line(0, "===== RUNTIME =====");

        let line = runtime_line(rig.settings().runtime_min(), rig, blink_on);
        self.screen.set_line(3, &line);

        let status = status_line(rig);
        self.screen.set_line(PANEL_ROWS - 1, &status);
    }
}

/// "Pump 3: 12h 34min" with the addressed digit blanked in the
/// blink-off phase
fn value_line_prefixed(
    pump: u8,
    minutes: u32,
    addressed: bool,
    rig: &Rig,
    blink_on: bool,
) -> String<LINE_LEN> {
    let mut line = String::new();
    let _ = write!(line, "Pump {}: ", pump + 1);
    push_duration(&mut line, minutes, addressed, rig, blink_on);
    line
}

fn runtime_line(minutes: u32, rig: &Rig, blink_on: bool) -> String<LINE_LEN> {
    let mut line = String::new();
    let _ = line.push_str("Runtime: ");
    push_duration(&mut line, minutes, true, rig, blink_on);
    line
}

/// Append "12h 34min", blanking the digit the cursor addresses when the
/// blink phase is off
fn push_duration(
    line: &mut String<LINE_LEN>,
    minutes: u32,
    addressed: bool,
    rig: &Rig,
    blink_on: bool,
) {
    let hours = minutes / 60;
    let mins = minutes % 60;

    let blank_hours = addressed && rig.on_hour_digit() && !blink_on;
    let blank_mins = addressed && !rig.on_hour_digit() && !blink_on;

    if blank_hours {
        let _ = line.push_str("   h ");
    } else {
        let _ = write!(line, "{:3}h ", hours);
    }
    if blank_mins {
        let _ = line.push_str("  min");
    } else {
        let _ = write!(line, "{:2}min", mins);
    }
}

/// Bottom status row: arming state, sample progress, degraded-config flag
fn status_line(rig: &Rig) -> String<LINE_LEN> {
    let mut status = String::new();
    if rig.is_armed() {
        let _ = write!(status, "armed {}/{}", rig.samples_done(), PUMP_COUNT);
    } else {
        let _ = status.push_str("idle");
    }
    if rig.pending_changes() {
        let _ = status.push_str(" *");
    }
    if !rig.settings().is_loaded() {
        let _ = status.push_str(" cfg?");
    }
    status
}
