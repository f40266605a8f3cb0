//! Hardware abstraction traits
//!
//! Seams between the application logic and hardware-specific
//! implementations.

pub mod pump;

pub use pump::PumpOutput;
