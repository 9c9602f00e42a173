//! Display refresh loop
//!
//! Drives one engine cycle, logs the outcome, then sleeps the
//! configured interval. Sleeping after the cycle means a slow fetch
//! stretches the period instead of stacking redraws.

use embassy_time::{Duration, Timer};
use log::{debug, info, warn};

use vellum_core::engine::RefreshEngine;

use crate::battery::BoardBattery;
use crate::clock::SyncedClock;
use crate::fetch::HttpPlanSource;
use crate::surface::BoardPanel;

#[embassy_executor::task]
pub async fn refresh_task(
    mut engine: RefreshEngine,
    mut panel: BoardPanel,
    mut source: HttpPlanSource,
    mut clock: SyncedClock,
    mut battery: BoardBattery,
) {
    let interval = Duration::from_millis(u64::from(engine.config().refresh_interval_ms));
    info!(
        "refresh loop started, interval {}ms",
        engine.config().refresh_interval_ms
    );

    loop {
        match engine
            .run_cycle(&mut panel, &mut source, &mut clock, &mut battery)
            .await
        {
            Ok(outcome) => {
                if let Some(err) = outcome.fetch_error {
                    if outcome.served_stale {
                        warn!("fetch failed ({:?}), showing cached plans", err);
                    } else {
                        warn!("fetch failed ({:?}), nothing cached yet", err);
                    }
                }
                if !outcome.clock_ok {
                    debug!("clock not synced, placeholder shown");
                }
                info!("cycle done, {} plans shown", outcome.items_shown);
            }
            Err(err) => {
                // Nothing reached the glass; try again next interval
                warn!("panel refresh failed: {:?}", err);
            }
        }

        Timer::after(interval).await;
    }
}
