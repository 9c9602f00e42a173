//! Wall clock backed by the SNTP epoch reference
//!
//! Wall time is the synced boot epoch plus monotonic uptime. Until the
//! first sync lands the clock reports `Unsynchronized` and the status
//! bar renders its placeholder.

use chrono::{DateTime, Datelike, Timelike};
use embassy_time::Instant;
use portable_atomic::Ordering;

use vellum_core::traits::{ClockError, LocalTime, WallClock};

use crate::channels::EPOCH_AT_BOOT;

/// Fixed display timezone. The device has no timezone UI; it renders
/// the offset of wherever it hangs (UTC+9 as shipped).
pub const TZ_OFFSET_SECS: i32 = 9 * 3600;

pub struct SyncedClock {
    tz_offset_secs: i32,
}

impl SyncedClock {
    pub const fn new(tz_offset_secs: i32) -> Self {
        Self { tz_offset_secs }
    }
}

impl WallClock for SyncedClock {
    fn now(&mut self) -> Result<LocalTime, ClockError> {
        let base = EPOCH_AT_BOOT.load(Ordering::Relaxed);
        if base == 0 {
            return Err(ClockError::Unsynchronized);
        }

        let unix = base.saturating_add(Instant::now().as_secs());
        let shifted = (unix as i64).saturating_add(i64::from(self.tz_offset_secs));
        let civil = DateTime::from_timestamp(shifted, 0)
            .ok_or(ClockError::Invalid)?
            .naive_utc();

        Ok(LocalTime {
            year: civil.year() as u16,
            month: civil.month() as u8,
            day: civil.day() as u8,
            hour: civil.hour() as u8,
            minute: civil.minute() as u8,
            second: civil.second() as u8,
        })
    }
}
