//! Daily refresh job. Sleeps until a fixed UTC hour, runs the full refresh
//! path, and keeps the previous snapshot serving if anything fails.

use super::engine::ProblemCache;
use chrono::{DateTime, Duration as ChronoDuration, Timelike, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

/// Spawn the recurring catalogue refresh task.
pub fn spawn_refresh_job(
    catalogue: Arc<ProblemCache>,
    hour_utc: u32,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(catalogue, hour_utc).await;
    })
}

async fn run(catalogue: Arc<ProblemCache>, hour_utc: u32) {
    info!("daily catalogue refresh scheduled at {:02}:00 UTC", hour_utc);

    loop {
        let wait = duration_until_next(Utc::now(), hour_utc);
        sleep(wait).await;

        match catalogue.force_refresh().await {
            Ok(count) => info!(problems = count, "scheduled refresh complete"),
            // Stale snapshot keeps serving; try again tomorrow
            Err(e) => error!("scheduled refresh failed: {e}"),
        }
    }
}

/// Time until the next occurrence of `hour:00:00` UTC, strictly in the
/// future.
pub(crate) fn duration_until_next(now: DateTime<Utc>, hour: u32) -> Duration {
    let mut next = now
        .with_hour(hour)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    if next <= now {
        next += ChronoDuration::days(1);
    }
    (next - now).to_std().unwrap_or(Duration::from_secs(60))
}
