//! Pump output drivers

pub mod gpio;

pub use gpio::GpioPump;
