use std::sync::Arc;

use tracing::{debug, info, warn};

use super::model::JobRecord;
use super::ports::SourceStore;
use super::store::JobStore;
use crate::infrastructure::qiniu::types::{code, PrefopReport};

/// What to do with the source object once a job completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    /// Engine callback: the source is superseded and gets deleted.
    Delete,
    /// Client poll: leave the source alone.
    Keep,
}

/// Maps an engine report onto a canonical record.
///
/// Unknown codes stay `Processing`; a job is never reported terminal on a
/// signal we do not understand.
pub fn classify(job_id: &str, report: &PrefopReport, bucket: &str) -> JobRecord {
    let first = report.items.first();

    match report.code {
        code::SUCCESS => match first {
            Some(item) if item.code == code::SUCCESS => {
                JobRecord::completed(job_id, format!("kodo://{}/{}", bucket, item.key))
            }
            Some(item) if !item.error.is_empty() => JobRecord::failed(job_id, item.error.clone()),
            _ => JobRecord::failed(job_id, report.desc.clone()),
        },
        code::FAILED | code::CALLBACK_FAILED => JobRecord::failed(job_id, report.desc.clone()),
        code::QUEUED | code::PROCESSING => JobRecord::processing(job_id),
        other => {
            debug!("Job {} reported unknown code {}, still processing", job_id, other);
            JobRecord::processing(job_id)
        }
    }
}

/// Folds callback and poll signals into the job store.
#[derive(Clone)]
pub struct Reconciler {
    store: JobStore,
    storage: Arc<dyn SourceStore>,
    default_bucket: String,
}

impl Reconciler {
    pub fn new(store: JobStore, storage: Arc<dyn SourceStore>, default_bucket: impl Into<String>) -> Self {
        Self {
            store,
            storage,
            default_bucket: default_bucket.into(),
        }
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    /// Commits the report and returns whatever record is stored afterwards.
    pub async fn reconcile(&self, job_id: &str, report: &PrefopReport, cleanup: Cleanup) -> JobRecord {
        let candidate = classify(job_id, report, self.bucket_of(report));
        let commit = self.store.commit(candidate, cleanup == Cleanup::Delete).await;

        if commit.cleanup_claimed {
            self.delete_source(job_id, report).await;
        }

        commit.record
    }

    // Runs after the commit; its outcome never touches the stored record.
    async fn delete_source(&self, job_id: &str, report: &PrefopReport) {
        if report.input_key.is_empty() {
            debug!("Job {} reported no input key, nothing to clean up", job_id);
            return;
        }

        let bucket = self.bucket_of(report);
        match self.storage.delete(bucket, &report.input_key).await {
            Ok(()) => info!("🗑️ Deleted source {}/{} of job {}", bucket, report.input_key, job_id),
            Err(e) => warn!("Failed to delete source of job {}: {}", job_id, e),
        }
    }

    fn bucket_of<'a>(&'a self, report: &'a PrefopReport) -> &'a str {
        if report.input_bucket.is_empty() {
            &self.default_bucket
        } else {
            &report.input_bucket
        }
    }
}
