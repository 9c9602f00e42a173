//! Plan feed source trait

use crate::feed::model::PlanFeed;

/// Errors from fetching the remote plan feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Connection, TLS, body read or timeout failure, or a non-success
    /// HTTP status
    Transport,
    /// Body was not valid JSON or exceeded the size budget
    Malformed,
    /// Body was valid JSON but the items array is absent
    MissingField,
}

/// Trait for fetching the current plan feed
///
/// One fetch per refresh cycle. Implementations own their endpoint,
/// credentials and timeout; by the time `fetch` returns, the result is
/// final for this cycle.
#[allow(async_fn_in_trait)]
pub trait PlanSource {
    async fn fetch(&mut self) -> Result<PlanFeed, FetchError>;
}
