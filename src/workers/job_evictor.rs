use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::modules::transcode::store::JobStore;

/// Periodically drops job records untouched for longer than `ttl`.
///
/// A dropped job that is queried again is simply re-polled from the engine.
pub async fn start_job_evictor(store: JobStore, ttl: Duration, every: Duration) {
    info!("🧹 Starting job evictor (ttl {:?}, every {:?})", ttl, every);

    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        sweep(&store, ttl).await;
    }
}

pub async fn sweep(store: &JobStore, ttl: Duration) -> usize {
    let cutoff = OffsetDateTime::now_utc() - ttl;
    let evicted = store.evict_older_than(cutoff).await;

    if evicted > 0 {
        info!("🧹 Evicted {} expired job records, {} remain", evicted, store.len().await);
    } else {
        debug!("No expired job records");
    }
    evicted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::transcode::model::JobRecord;

    #[tokio::test]
    async fn sweep_keeps_records_within_ttl() {
        let store = JobStore::new();
        store.insert_processing("job-1").await;
        store.commit(JobRecord::failed("job-2", "boom"), false).await;

        assert_eq!(sweep(&store, Duration::from_secs(3600)).await, 0);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn sweep_with_zero_ttl_drops_everything_older_than_now() {
        let store = JobStore::new();
        store.insert_processing("job-1").await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(sweep(&store, Duration::ZERO).await, 1);
        assert!(store.get("job-1").await.is_none());
    }
}
