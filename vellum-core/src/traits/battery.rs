//! Battery voltage sensing trait

/// Trait for sampling the battery voltage
///
/// Readings are in millivolts at the cell, after any divider correction.
/// Sampling is infallible: implementations return their best estimate and
/// out-of-range values are absorbed by the gauge clamp.
pub trait BatteryProbe {
    /// Sample the battery voltage in millivolts
    fn millivolts(&mut self) -> u32;
}
