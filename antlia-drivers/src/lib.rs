//! Hardware driver implementations for the Antlia water sampler
//!
//! Drivers implement the traits from `antlia-core` on top of plain
//! digital outputs. The only actuator class on this rig is the pump
//! relay/MOSFET output.

#![no_std]
#![deny(unsafe_code)]

pub mod pump;

pub use pump::GpioPump;
