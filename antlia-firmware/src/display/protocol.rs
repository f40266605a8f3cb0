//! Protocol helpers for panel communication
//!
//! Turns a rendered [`Screen`] into the frame sequence the panel
//! understands: clear, one text frame per non-empty row, then the
//! inversion command if a row is highlighted.

use antlia_protocol::{Frame, FrameError, ScreenCommand, PANEL_ROWS};
use heapless::Vec;

use super::Screen;

/// Upper bound: clear + every row + invert
pub const MAX_SCREEN_FRAMES: usize = PANEL_ROWS as usize + 2;

/// Encode a screen into its frame sequence
pub fn encode_screen(screen: &Screen) -> Vec<Frame, MAX_SCREEN_FRAMES> {
    let mut frames = Vec::new();

    if let Ok(frame) = ScreenCommand::Clear.to_frame() {
        let _ = frames.push(frame);
    }

    for row in 0..PANEL_ROWS {
        let text = screen.get_line(row);
        if text.is_empty() {
            continue;
        }
        if let Ok(frame) = (ScreenCommand::Text { row, col: 0, text }).to_frame() {
            let _ = frames.push(frame);
        }
    }

    if let Some(row) = screen.inverted_row() {
        if let Ok(frame) = (ScreenCommand::InvertRow { row }).to_frame() {
            let _ = frames.push(frame);
        }
    }

    frames
}

/// Heartbeat response frame
pub fn pong_frame() -> Result<Frame, FrameError> {
    ScreenCommand::Pong.to_frame()
}
