use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::model::{JobRecord, JobStatus};

struct Entry {
    record: JobRecord,
    cleanup_claimed: bool,
}

/// Result of [`JobStore::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Record stored after the commit, which is the previous one when it was terminal.
    pub record: JobRecord,
    pub applied: bool,
    /// Set for exactly one commit per job: the caller owns the source cleanup.
    pub cleanup_claimed: bool,
}

/// In-memory job table shared by request handlers.
///
/// Every read and write goes through one `RwLock`, and the terminal-state
/// rule lives in [`JobStore::commit`], so concurrent callback and poll
/// writers cannot interleave field updates.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<String, Entry>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly submitted job. An existing record is left alone.
    pub async fn insert_processing(&self, job_id: &str) -> JobRecord {
        let mut jobs = self.jobs.write().await;
        let entry = jobs.entry(job_id.to_string()).or_insert_with(|| Entry {
            record: JobRecord::processing(job_id),
            cleanup_claimed: false,
        });

        entry.record.clone()
    }

    pub async fn get(&self, job_id: &str) -> Option<JobRecord> {
        self.jobs
            .read()
            .await
            .get(job_id)
            .map(|entry| entry.record.clone())
    }

    /// Replaces the whole record unless the stored one is already terminal.
    pub async fn commit(&self, candidate: JobRecord, claim_cleanup: bool) -> Commit {
        let now = OffsetDateTime::now_utc();
        let mut jobs = self.jobs.write().await;

        let mut applied = false;
        let entry = jobs.entry(candidate.job_id.clone()).or_insert_with(|| {
            applied = true;
            Entry {
                record: candidate.clone(),
                cleanup_claimed: false,
            }
        });

        if !applied {
            if entry.record.status.is_terminal() {
                if !entry.record.same_outcome(&candidate) {
                    warn!(
                        "Discarding {} signal for job {}: already {}",
                        candidate.status, candidate.job_id, entry.record.status
                    );
                }
            } else if !entry.record.same_outcome(&candidate) {
                entry.record = JobRecord {
                    created_at: entry.record.created_at,
                    updated_at: now,
                    ..candidate.clone()
                };
                applied = true;
            }
        }

        if applied {
            info!("Job {} is {}", entry.record.job_id, entry.record.status);
        } else {
            debug!("Job {} unchanged ({})", entry.record.job_id, entry.record.status);
        }

        let cleanup_claimed = claim_cleanup
            && candidate.status == JobStatus::Completed
            && entry.record.status == JobStatus::Completed
            && !entry.cleanup_claimed;
        if cleanup_claimed {
            entry.cleanup_claimed = true;
        }

        Commit {
            record: entry.record.clone(),
            applied,
            cleanup_claimed,
        }
    }

    /// Drops records whose last change is older than `cutoff`.
    pub async fn evict_older_than(&self, cutoff: OffsetDateTime) -> usize {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, entry| entry.record.updated_at >= cutoff);
        before - jobs.len()
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[tokio::test]
    async fn insert_creates_processing_record() {
        let store = JobStore::new();
        let record = store.insert_processing("job-1").await;

        assert_eq!(record.status, JobStatus::Processing);
        assert!(record.output_url.is_none() && record.error.is_none());
        assert_eq!(store.get("job-1").await, Some(record));
    }

    #[tokio::test]
    async fn insert_does_not_reset_existing_record() {
        let store = JobStore::new();
        store.insert_processing("job-1").await;
        store.commit(JobRecord::failed("job-1", "boom"), false).await;

        let record = store.insert_processing("job-1").await;
        assert_eq!(record.status, JobStatus::Failed);
    }

    #[tokio::test]
    async fn terminal_commit_is_idempotent() {
        let store = JobStore::new();
        store.insert_processing("job-1").await;

        let first = store
            .commit(JobRecord::completed("job-1", "kodo://b/a.mp4"), false)
            .await;
        assert!(first.applied);

        for _ in 0..5 {
            let again = store
                .commit(JobRecord::completed("job-1", "kodo://b/a.mp4"), false)
                .await;
            assert!(!again.applied);
            assert_eq!(again.record, first.record);
        }
        assert_eq!(store.get("job-1").await, Some(first.record));
    }

    #[tokio::test]
    async fn terminal_record_ignores_later_signals() {
        let store = JobStore::new();
        store.insert_processing("job-1").await;
        let done = store.commit(JobRecord::failed("job-1", "bad codec"), false).await;

        let late_success = store
            .commit(JobRecord::completed("job-1", "kodo://b/a.mp4"), true)
            .await;
        let late_processing = store.commit(JobRecord::processing("job-1"), false).await;

        assert!(!late_success.applied && !late_success.cleanup_claimed);
        assert!(!late_processing.applied);
        assert_eq!(store.get("job-1").await, Some(done.record));
    }

    #[tokio::test]
    async fn processing_rewrite_keeps_timestamps() {
        let store = JobStore::new();
        let original = store.insert_processing("job-1").await;

        let commit = store.commit(JobRecord::processing("job-1"), false).await;
        assert!(!commit.applied);
        assert_eq!(commit.record, original);
    }

    #[tokio::test]
    async fn commit_for_unknown_job_inserts_it() {
        let store = JobStore::new();
        let commit = store.commit(JobRecord::failed("ghost", "nope"), false).await;

        assert!(commit.applied);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn cleanup_is_claimed_once() {
        let store = JobStore::new();
        store.insert_processing("job-1").await;

        let claims = [
            store.commit(JobRecord::completed("job-1", "kodo://b/a.mp4"), false).await,
            store.commit(JobRecord::completed("job-1", "kodo://b/a.mp4"), true).await,
            store.commit(JobRecord::completed("job-1", "kodo://b/a.mp4"), true).await,
        ];

        let claimed: Vec<bool> = claims.iter().map(|c| c.cleanup_claimed).collect();
        assert_eq!(claimed, vec![false, true, false]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_commits_converge_on_one_record() {
        let store = JobStore::new();
        store.insert_processing("job-1").await;

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..32 {
            let store = store.clone();
            tasks.spawn(async move {
                store
                    .commit(JobRecord::completed("job-1", "kodo://b/a.mp4"), i % 2 == 0)
                    .await
            });
        }

        let mut applied = 0;
        let mut claimed = 0;
        while let Some(result) = tasks.join_next().await {
            let commit = result.unwrap();
            applied += commit.applied as usize;
            claimed += commit.cleanup_claimed as usize;
        }

        assert_eq!(applied, 1);
        assert_eq!(claimed, 1);
        let stored = store.get("job-1").await.unwrap();
        assert_eq!(stored.status, JobStatus::Completed);
        assert_eq!(stored.output_url.as_deref(), Some("kodo://b/a.mp4"));
        assert!(stored.error.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_different_outcomes_never_mix_fields() {
        let store = JobStore::new();
        store.insert_processing("job-1").await;

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..32 {
            let store = store.clone();
            tasks.spawn(async move {
                let candidate = if i % 2 == 0 {
                    JobRecord::completed("job-1", "kodo://b/a.mp4")
                } else {
                    JobRecord::failed("job-1", "bad codec")
                };
                store.commit(candidate, false).await
            });
        }
        while tasks.join_next().await.is_some() {}

        let stored = store.get("job-1").await.unwrap();
        match stored.status {
            JobStatus::Completed => assert!(stored.output_url.is_some() && stored.error.is_none()),
            JobStatus::Failed => assert!(stored.output_url.is_none() && stored.error.is_some()),
            JobStatus::Processing => panic!("record did not reach a terminal state"),
        }
    }

    #[tokio::test]
    async fn eviction_drops_only_stale_records() {
        let store = JobStore::new();
        store.insert_processing("old").await;
        store.insert_processing("fresh").await;

        let none_evicted = store
            .evict_older_than(OffsetDateTime::now_utc() - Duration::hours(1))
            .await;
        assert_eq!(none_evicted, 0);

        let all_evicted = store
            .evict_older_than(OffsetDateTime::now_utc() + Duration::seconds(1))
            .await;
        assert_eq!(all_evicted, 2);
        assert!(store.get("old").await.is_none());
    }
}
