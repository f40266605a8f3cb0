//! Front Panel Communication Protocol
//!
//! This crate defines the UART-based protocol between the controller
//! board and the front panel (a small display MCU). The panel acts as a
//! dumb terminal: it renders text rows and row inversion and sends
//! periodic heartbeats. All UI logic stays on the controller; the three
//! rig buttons are wired to the controller's own ADC, not the panel.
//!
//! # Frame format
//!
//! ```text
//! ┌──────┬────────┬──────┬───────────┬──────────┐
//! │ SYNC │ LENGTH │ TYPE │ PAYLOAD   │ CHECKSUM │
//! │ 0xA5 │ 1B     │ 1B   │ 0–32B     │ 1B       │
//! └──────┴────────┴──────┴───────────┴──────────┘
//! ```
//!
//! CHECKSUM is the two's complement of the byte sum of LENGTH, TYPE and
//! PAYLOAD, so summing LENGTH through CHECKSUM yields zero for a valid
//! frame.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, Parser, MAX_PAYLOAD, SYNC};
pub use messages::{PanelReport, ScreenCommand, PANEL_COLS, PANEL_ROWS};
