//! Front panel communication
//!
//! The panel is a small display MCU acting as a "dumb terminal": it
//! renders text rows and row inversion and sends periodic PING
//! heartbeats. All UI logic stays on the controller; if the panel misses
//! its PONG responses it shows a link-lost screen on its own.

pub mod protocol;
pub mod renderer;

pub use renderer::{Renderer, Screen};
