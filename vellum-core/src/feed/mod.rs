//! Plan feed: wire model, bounded parsing and the last-good cache

pub mod cache;
pub mod model;
pub mod parse;

pub use cache::FeedCache;
pub use model::{PlanFeed, PlanItem, MAX_FEED_BYTES, MAX_FEED_ITEMS};
pub use parse::parse_feed;
