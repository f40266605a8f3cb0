//! Pump actuator abstraction

/// A single pump output
///
/// Implementations drive the underlying digital output; the engine only
/// deals in logical on/off. Output writes are assumed infallible on this
/// class of hardware.
pub trait PumpOutput {
    /// Energize or release the pump
    fn set_on(&mut self, on: bool);

    /// Logical state last commanded
    fn is_on(&self) -> bool;
}
