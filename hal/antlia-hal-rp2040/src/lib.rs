//! RP2040 HAL implementation for Antlia
//!
//! Provides the chip-specific pieces the firmware binary wires together:
//! wear-leveled settings storage in the last flash sectors and the ADC
//! reader for the analog button ladder.

#![no_std]

pub mod buttons;
pub mod flash;

pub use buttons::ButtonAdc;
pub use flash::SettingsFlash;

// Re-export the trait so callers get the methods without importing
// antlia-hal themselves
pub use antlia_hal::SettingsStorage as SettingsStorageTrait;
