//! Battery gauge
//!
//! Maps a measured cell voltage to the charge fraction shown in the
//! status bar. Single LiPo cell, linear approximation between the
//! discharge cutoff and the charge voltage.

use core::fmt::Write;

use heapless::String;

/// Voltage read as completely discharged
pub const BATTERY_EMPTY_MV: u32 = 3300;
/// Voltage read as fully charged
pub const BATTERY_FULL_MV: u32 = 4350;
/// Capacity of the status bar battery label
pub const LABEL_LEN: usize = 12;

/// Convert a cell voltage to a charge fraction
///
/// Linear between [`BATTERY_EMPTY_MV`] and [`BATTERY_FULL_MV`], clamped
/// to `0.01..=1.0`. The floor is one percent, never zero.
pub fn charge_fraction(millivolts: u32) -> f32 {
    let clamped = millivolts.clamp(BATTERY_EMPTY_MV, BATTERY_FULL_MV);
    let span = (BATTERY_FULL_MV - BATTERY_EMPTY_MV) as f32;
    let fraction = (clamped - BATTERY_EMPTY_MV) as f32 / span;
    fraction.max(0.01)
}

/// Status bar label for a charge fraction, e.g. `bat:57%`
pub fn charge_label(fraction: f32) -> String<LABEL_LEN> {
    let mut s = String::new();
    let _ = write!(s, "bat:{:.0}%", fraction * 100.0);
    s
}
