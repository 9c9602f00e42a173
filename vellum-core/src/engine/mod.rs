//! Refresh engine
//!
//! One call renders one complete display cycle: clear, status bar, fetch,
//! agenda, flush. The firmware task owns the cadence between calls and
//! the logging of what each cycle reports back.

use heapless::String;

use crate::feed::cache::FeedCache;
use crate::feed::model::PlanFeed;
use crate::gauge;
use crate::layout::{render_agenda, render_status_bar};
use crate::traits::battery::BatteryProbe;
use crate::traits::clock::{WallClock, STAMP_LEN, TIME_PLACEHOLDER};
use crate::traits::source::{FetchError, PlanSource};
use crate::traits::surface::{DrawSurface, RefreshMode, SurfaceError};

/// Timing knobs owned by the refresh loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause between cycles
    pub refresh_interval_ms: u32,
    /// Budget for one remote fetch, connection setup included
    pub fetch_timeout_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 10_000,
            fetch_timeout_ms: 5_000,
        }
    }
}

/// What one cycle did, for the caller to log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Fetch failure absorbed this cycle, if any
    pub fetch_error: Option<FetchError>,
    /// The rendered feed came from the cache instead of this cycle's fetch
    pub served_stale: bool,
    /// The clock read succeeded
    pub clock_ok: bool,
    /// Item rows rendered
    pub items_shown: usize,
}

/// Drives the clear / status / fetch / agenda / flush cycle
///
/// Owns the last-good cache; the surface, source, clock and battery are
/// borrowed per cycle so tests can hand in fakes.
pub struct RefreshEngine {
    cache: FeedCache,
    config: EngineConfig,
}

impl RefreshEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cache: FeedCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one display cycle
    ///
    /// Fetch and clock failures are absorbed and reported in the outcome.
    /// Only a surface failure aborts the cycle; the panel content is then
    /// stale until a later cycle completes.
    pub async fn run_cycle<S, P, C, B>(
        &mut self,
        surface: &mut S,
        source: &mut P,
        clock: &mut C,
        battery: &mut B,
    ) -> Result<CycleOutcome, SurfaceError>
    where
        S: DrawSurface,
        P: PlanSource,
        C: WallClock,
        B: BatteryProbe,
    {
        surface.clear()?;

        let clock_read = clock.now();
        let clock_ok = clock_read.is_ok();
        let time_text: String<STAMP_LEN> = match clock_read {
            Ok(now) => now.stamp(),
            Err(_) => {
                let mut s = String::new();
                let _ = s.push_str(TIME_PLACEHOLDER);
                s
            }
        };
        let battery_text = gauge::charge_label(gauge::charge_fraction(battery.millivolts()));
        render_status_bar(surface, &time_text, &battery_text)?;

        let (feed, fetch_error, served_stale) = match source.fetch().await {
            Ok(feed) => {
                self.cache.store(feed.clone());
                (feed, None, false)
            }
            Err(err) => {
                let stale = self.cache.last_good().is_some();
                let fallback = self
                    .cache
                    .last_good()
                    .cloned()
                    .unwrap_or_else(PlanFeed::empty);
                (fallback, Some(err), stale)
            }
        };

        let items_shown = render_agenda(surface, &feed)?;
        surface.flush(RefreshMode::GhostReduced)?;

        Ok(CycleOutcome {
            fetch_error,
            served_stale,
            clock_ok,
            items_shown,
        })
    }
}
