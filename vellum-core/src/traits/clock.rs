//! Wall clock trait and the civil time it reports

use core::fmt::Write;

use heapless::String;

/// Length of a formatted [`LocalTime`] stamp
pub const STAMP_LEN: usize = 19;

/// Shown in the status bar when the clock cannot be read
pub const TIME_PLACEHOLDER: &str = "--:--:--";

/// Errors from a wall clock read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// No time reference yet (first network sync still pending)
    Unsynchronized,
    /// The time reference exists but does not convert to a civil time
    Invalid,
}

/// Civil date and time in the display's local timezone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl LocalTime {
    /// Format as `YYYY-MM-DD HH:MM:SS`
    pub fn stamp(&self) -> String<STAMP_LEN> {
        let mut s = String::new();
        let _ = write!(
            s,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        );
        s
    }
}

/// Trait for reading the current local time
///
/// Reads may fail, e.g. before the first network time sync. Callers fall
/// back to [`TIME_PLACEHOLDER`] and never treat a failed read as fatal.
pub trait WallClock {
    fn now(&mut self) -> Result<LocalTime, ClockError>;
}
