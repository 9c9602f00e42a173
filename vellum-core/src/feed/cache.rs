//! Last-good feed cache
//!
//! Single slot, RAM only. After a failed fetch the previous feed keeps
//! being rendered for as long as the device stays up; nothing survives a
//! power cycle.

use crate::feed::model::PlanFeed;

/// Holds the most recently fetched feed
#[derive(Debug, Default)]
pub struct FeedCache {
    last_good: Option<PlanFeed>,
}

impl FeedCache {
    /// Empty cache
    pub const fn new() -> Self {
        Self { last_good: None }
    }

    /// Replace the cached feed
    pub fn store(&mut self, feed: PlanFeed) {
        self.last_good = Some(feed);
    }

    /// The cached feed, if any fetch has ever succeeded
    pub fn last_good(&self) -> Option<&PlanFeed> {
        self.last_good.as_ref()
    }
}
