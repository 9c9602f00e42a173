//! Shared inter-task state
//!
//! The only value crossing task boundaries is the synced wall-clock
//! reference: written by the time sync task, read by the clock on every
//! status-bar render.

use portable_atomic::AtomicU64;

/// Unix epoch seconds at the instant the device booted, or 0 until the
/// first successful time sync.
///
/// Current wall time = this value + monotonic uptime seconds.
pub static EPOCH_AT_BOOT: AtomicU64 = AtomicU64::new(0);
