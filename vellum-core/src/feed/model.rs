//! Plan feed data model
//!
//! Keeps only what the display consumes. The endpoint also serves
//! `status`, `startTime` and `endTime` per item; those are skipped at
//! parse time.

use heapless::{String, Vec};
use serde::Deserialize;

/// Most items retained from one response body
pub const MAX_FEED_ITEMS: usize = 24;
/// Capacity of an item title
pub const MAX_TITLE_LEN: usize = 48;
/// Capacity of an item's preformatted time label
pub const MAX_TIME_LABEL_LEN: usize = 24;
/// Response body budget in bytes
pub const MAX_FEED_BYTES: usize = 1024;

/// One agenda entry as served by the endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlanItem {
    /// Event title
    pub title: String<MAX_TITLE_LEN>,
    /// Preformatted time range, e.g. `09:00 - 10:30`
    #[serde(rename = "displayTime")]
    pub display_time: String<MAX_TIME_LABEL_LEN>,
}

/// A parsed plan feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlanFeed {
    /// Item count reported by the endpoint. Advisory: rendering never
    /// trusts it past the items actually present.
    pub num_items: u16,
    /// Items in endpoint order
    pub items: Vec<PlanItem, MAX_FEED_ITEMS>,
}

impl PlanFeed {
    /// Feed with no items, rendered before any fetch has succeeded
    pub fn empty() -> Self {
        Self::default()
    }
}
