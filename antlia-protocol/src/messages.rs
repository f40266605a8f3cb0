//! Message types for the front panel link
//!
//! Two directions:
//! - Controller → panel: screen commands and heartbeat responses
//! - Panel → controller: heartbeat requests

use crate::frame::{Frame, FrameError, MAX_PAYLOAD};
use heapless::Vec;

// Message type IDs: panel → controller
pub const MSG_PING: u8 = 0x05;

// Message type IDs: controller → panel
pub const MSG_CLEAR: u8 = 0x40;
pub const MSG_TEXT: u8 = 0x41;
pub const MSG_INVERT: u8 = 0x42;
pub const MSG_PONG: u8 = 0x43;

/// Panel dimensions (character cells)
pub const PANEL_ROWS: u8 = 8;
pub const PANEL_COLS: u8 = 21;

/// Commands from the controller to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenCommand<'a> {
    /// Blank the whole screen
    Clear,
    /// Draw text starting at a cell. Length is implied by the payload;
    /// the panel clips at the right edge.
    Text { row: u8, col: u8, text: &'a str },
    /// Invert an entire row (active pump highlight)
    InvertRow { row: u8 },
    /// Heartbeat response
    Pong,
}

impl<'a> ScreenCommand<'a> {
    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ScreenCommand::Clear => Ok(Frame::bare(MSG_CLEAR)),
            ScreenCommand::Text { row, col, text } => {
                let bytes = text.as_bytes();
                let clipped = bytes.len().min(PANEL_COLS as usize);

                let mut payload = Vec::<u8, MAX_PAYLOAD>::new();
                payload.push(*row).map_err(|_| FrameError::PayloadTooLarge)?;
                payload.push(*col).map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(&bytes[..clipped])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_TEXT, &payload)
            }
            ScreenCommand::InvertRow { row } => Frame::new(MSG_INVERT, &[*row]),
            ScreenCommand::Pong => Ok(Frame::bare(MSG_PONG)),
        }
    }
}

/// Reports parsed from panel-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelReport {
    /// Heartbeat request; the controller answers with Pong
    Ping,
}

impl PanelReport {
    /// Parse a report from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PING => Ok(PanelReport::Ping),
            _ => Err(FrameError::Unsupported),
        }
    }

    /// Encode this report into a frame (panel simulation and tests)
    pub fn to_frame(&self) -> Frame {
        match self {
            PanelReport::Ping => Frame::bare(MSG_PING),
        }
    }
}
